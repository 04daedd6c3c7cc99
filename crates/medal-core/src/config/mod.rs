//! Configuration system for MedAL.
//! TOML-based, layered resolution: overrides > env > file > defaults.

pub mod checkpoint_config;
pub mod defaults;
pub mod medal_config;
pub mod observability_config;
pub mod presets;
pub mod selection_config;
pub mod training_config;

pub use checkpoint_config::CheckpointConfig;
pub use medal_config::{ConfigOverrides, MedalConfig};
pub use observability_config::ObservabilityConfig;
pub use presets::ModelPreset;
pub use selection_config::SelectionConfig;
pub use training_config::{TrainingConfig, TrainingSetPolicyKind};
