use crate::models::LayerId;

/// Names the layer whose output is used as the feature embedding.
/// Implemented per classifier architecture.
pub trait IEmbeddingLayerSelector: Send + Sync {
    fn embedding_layer(&self) -> LayerId;
}

impl IEmbeddingLayerSelector for LayerId {
    fn embedding_layer(&self) -> LayerId {
        self.clone()
    }
}
