use super::error_code::{self, MedalErrorCode};
use super::{CheckpointError, ConfigError, LabelError, SelectionError};

/// Top-level error for the MedAL engine.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum MedalError {
    #[error("label state error: {0}")]
    Label(#[from] LabelError),

    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),

    #[error("{component} failed: {reason}")]
    Collaborator { component: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MedalError {
    /// Shorthand for failures reported by an external collaborator
    /// (classifier, batch source, trainer).
    pub fn collaborator(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Collaborator {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error signals broken internal bookkeeping or a numerical
    /// fault. These abort the run and are never retried.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::Label(_) | Self::Selection(_))
    }
}

impl MedalErrorCode for MedalError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Label(e) => e.error_code(),
            Self::Selection(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Checkpoint(e) => e.error_code(),
            Self::Collaborator { .. } => error_code::COLLABORATOR_ERROR,
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}

/// Convenience alias used across the workspace.
pub type MedalResult<T> = Result<T, MedalError>;
