// Single source of truth for all default values.

// --- Run ---
pub const DEFAULT_RUN_ID: &str = "medal";
pub const DEFAULT_SEED: u64 = 0;

// --- Selection ---
pub const DEFAULT_AL_ITERS: u32 = 34;
pub const DEFAULT_NUM_MAX_ENTROPY_SAMPLES: usize = 20;
pub const DEFAULT_POINTS_PER_AL_ITER: usize = 10;

// --- Training ---
pub const DEFAULT_EPOCHS: u32 = 100;
pub const DEFAULT_RESET_MODEL_WEIGHTS: bool = true;

// --- Checkpoints ---
pub const DEFAULT_CHECKPOINT_DIR: &str = "data/model_checkpoints";
pub const DEFAULT_CHECKPOINT_INTERVAL: u32 = 1; // 0 disables checkpointing

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
