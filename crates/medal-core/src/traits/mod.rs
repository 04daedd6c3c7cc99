//! Collaborator seams. The engine drives these; implementations live
//! outside the core (model code, data loaders, optimizers, storage).

pub mod batch_source;
pub mod checkpoint_store;
pub mod classifier;
pub mod layer_selector;
pub mod trainer;
pub mod training_set_policy;

pub use batch_source::{BatchIter, IBatchSource};
pub use checkpoint_store::ICheckpointStore;
pub use classifier::IClassifier;
pub use layer_selector::IEmbeddingLayerSelector;
pub use trainer::ITrainer;
pub use training_set_policy::ITrainingSetPolicy;
