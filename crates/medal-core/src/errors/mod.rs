//! Error handling for MedAL.
//! One error enum per subsystem, aggregated by `MedalError`.

pub mod checkpoint_error;
pub mod config_error;
pub mod error_code;
pub mod label_error;
pub mod medal_error;
pub mod selection_error;

pub use checkpoint_error::CheckpointError;
pub use config_error::ConfigError;
pub use error_code::MedalErrorCode;
pub use label_error::LabelError;
pub use medal_error::{MedalError, MedalResult};
pub use selection_error::SelectionError;
