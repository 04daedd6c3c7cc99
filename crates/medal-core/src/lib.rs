//! # medal-core
//!
//! Foundation crate for the MedAL active learning engine.
//! Defines the shared types, collaborator traits, errors, config, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::{MedalConfig, ModelPreset};
pub use errors::{MedalError, MedalResult};
pub use models::{
    Batch, Checkpoint, EmbeddingRecord, EmbeddingSet, EpochMetrics, IterationRecord, LabelState,
    LayerId, ParameterBlob,
};
