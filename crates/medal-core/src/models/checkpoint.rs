use serde::{Deserialize, Serialize};

use super::{IterationRecord, LabelState, ParameterBlob};

/// Everything needed to resume a run mid-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub run_id: String,
    pub record: IterationRecord,
    /// Label flags together with the training index set they refer to.
    pub labels: LabelState,
    pub model_state: ParameterBlob,
    #[serde(default)]
    pub optimizer_state: Option<ParameterBlob>,
    /// Weights taken before the first iteration, kept so a resumed run
    /// resets to the same starting point as the original run.
    #[serde(default)]
    pub initial_model_state: Option<ParameterBlob>,
}
