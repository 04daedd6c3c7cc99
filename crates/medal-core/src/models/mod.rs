pub mod batch;
pub mod checkpoint;
pub mod embedding;
pub mod epoch_metrics;
pub mod iteration_record;
pub mod label_state;
pub mod layer;
pub mod parameter_blob;

pub use batch::Batch;
pub use checkpoint::Checkpoint;
pub use embedding::{EmbeddingRecord, EmbeddingSet};
pub use epoch_metrics::EpochMetrics;
pub use iteration_record::{IterationRecord, ResumePoint};
pub use label_state::LabelState;
pub use layer::LayerId;
pub use parameter_blob::ParameterBlob;
