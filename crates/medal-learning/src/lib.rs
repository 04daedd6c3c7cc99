//! # medal-learning
//!
//! The active learning loop and what it plugs in:
//! - `engine`: `ActiveLearningLoop`, the iteration state machine, and `run_active_learning`
//! - `policy`: which labeled points are replayed when retraining
//! - `checkpoint`: JSON file store for resumable runs

pub mod checkpoint;
pub mod engine;
pub mod policy;

pub use checkpoint::JsonCheckpointStore;
pub use engine::{run_active_learning, ActiveLearningLoop, Collaborators, LoopOutcome, TerminalState};
pub use policy::{build_policy, FullPolicy, OnlineSamplePolicy};
