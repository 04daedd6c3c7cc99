//! Checkpoint persistence.

pub mod json_store;

pub use json_store::{checkpoint_file_name, parse_checkpoint_file_name, JsonCheckpointStore};
