//! Errors from the sample-selection core: extraction and diversity picking.
//! All of them indicate an upstream logic or numerical fault.

use super::error_code::{self, MedalErrorCode};

/// Errors that can occur while scoring or selecting candidates.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("classifier produced invalid probability {probability} at pool position {position}")]
    InvalidProbability { position: usize, probability: f64 },

    #[error("entropy is non-finite for probability {probability} at pool position {position}")]
    NonFiniteEntropy { position: usize, probability: f64 },

    #[error("count mismatch in {context}: expected {expected}, got {actual}")]
    CountMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("embedding at pool position {position} contains a non-finite value")]
    NonFiniteEmbedding { position: usize },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("diversity selection needs at least one labeled embedding")]
    EmptyLabeledSet,

    #[error("selector returned {picked} distinct positions, expected {requested}")]
    ShortSelection { requested: usize, picked: usize },
}

impl MedalErrorCode for SelectionError {
    fn error_code(&self) -> &'static str {
        error_code::INVARIANT_VIOLATION
    }
}
