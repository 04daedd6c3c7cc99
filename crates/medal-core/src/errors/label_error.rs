//! Label bookkeeping errors. All of them are invariant violations.

use super::error_code::{self, MedalErrorCode};

/// Errors raised by `LabelState`.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("training index {index} is already labeled")]
    AlreadyLabeled { index: usize },

    #[error("unlabeled position {position} out of range: pool has {pool_size} items")]
    PositionOutOfRange { position: usize, pool_size: usize },

    #[error("label flags ({flags}) do not match training indices ({indices})")]
    LengthMismatch { flags: usize, indices: usize },
}

impl MedalErrorCode for LabelError {
    fn error_code(&self) -> &'static str {
        error_code::INVARIANT_VIOLATION
    }
}
