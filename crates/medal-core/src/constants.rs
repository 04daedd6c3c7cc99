/// MedAL engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "MEDAL_LOG";

/// File extension of persisted checkpoints.
pub const CHECKPOINT_EXTENSION: &str = "json";
