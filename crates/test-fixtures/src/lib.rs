//! Test doubles for the MedAL collaborator traits.
//!
//! - `ScriptedClassifier`: probability and embedding are read straight from
//!   the input row, so tests control entropy and geometry exactly.
//! - `LogisticClassifier` + `SgdTrainer`: a tiny model that actually learns.
//! - `RecordingTrainer`: evaluates only and records every call.
//! - `InMemoryDataset`: an `IBatchSource` over owned rows.
//! - `MemoryCheckpointStore`: an `ICheckpointStore` kept in a `Mutex<Vec<_>>`.

pub mod checkpoint;
pub mod classifier;
pub mod dataset;
pub mod trainer;

pub use checkpoint::MemoryCheckpointStore;
pub use classifier::{
    LogisticClassifier, LogisticParams, ScriptedClassifier, ScriptedProbe, HIDDEN_LAYER,
    SCRIPTED_LAYER,
};
pub use dataset::InMemoryDataset;
pub use trainer::{CallLog, RecordingTrainer, SgdTrainer, TrainerCall};
