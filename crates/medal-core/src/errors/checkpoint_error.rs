//! Checkpoint persistence errors.

use super::error_code::{self, MedalErrorCode};

/// Errors raised by checkpoint stores.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("checkpoint I/O failed at {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("corrupt checkpoint {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("checkpoint belongs to run {found}, expected {expected}")]
    RunMismatch { expected: String, found: String },
}

impl MedalErrorCode for CheckpointError {
    fn error_code(&self) -> &'static str {
        error_code::CHECKPOINT_ERROR
    }
}
