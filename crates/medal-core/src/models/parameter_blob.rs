use serde::{Deserialize, Serialize};

/// Opaque serialized parameter state (model weights or optimizer state).
/// The byte format belongs to whoever produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParameterBlob(Vec<u8>);

impl ParameterBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ParameterBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}
