//! Stable error codes for logs and callers that match on failure classes.

/// Every error enum provides a structured code string.
pub trait MedalErrorCode {
    /// Returns the error code string (e.g., "INVARIANT_VIOLATION").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVARIANT_VIOLATION: &str = "INVARIANT_VIOLATION";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CHECKPOINT_ERROR: &str = "CHECKPOINT_ERROR";
pub const COLLABORATOR_ERROR: &str = "COLLABORATOR_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
