//! Per-architecture hyperparameters and embedding layers.

use serde::{Deserialize, Serialize};

use super::{MedalConfig, TrainingSetPolicyKind};
use crate::models::LayerId;
use crate::traits::IEmbeddingLayerSelector;

/// Known classifier setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelPreset {
    InceptionV3,
    SqueezeNet,
    Resnet18,
    /// ResNet18 retrained online: no weight reset, partial replay.
    OnlineResnet18,
}

impl ModelPreset {
    pub const ALL: [ModelPreset; 4] = [
        Self::InceptionV3,
        Self::SqueezeNet,
        Self::Resnet18,
        Self::OnlineResnet18,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::InceptionV3 => "inception_v3",
            Self::SqueezeNet => "squeeze_net",
            Self::Resnet18 => "resnet18",
            Self::OnlineResnet18 => "online_resnet18",
        }
    }

    /// Look a preset up by its snake_case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Apply this preset's hyperparameters on top of `config`.
    ///
    /// The online preset selects the online policy but leaves
    /// `online_sample_frac` alone; validation rejects the config until a
    /// fraction is supplied.
    pub fn apply(self, config: &mut MedalConfig) {
        let selection = &mut config.selection;
        match self {
            Self::InceptionV3 | Self::SqueezeNet => {
                selection.al_iters = 34;
                selection.num_max_entropy_samples = 20;
                selection.num_points_to_label_per_al_iter = 10;
            }
            Self::Resnet18 | Self::OnlineResnet18 => {
                selection.al_iters = 49;
                selection.num_max_entropy_samples = 50;
                selection.num_points_to_label_per_al_iter = 20;
                config.checkpoint.interval = 0;
            }
        }
        if self == Self::OnlineResnet18 {
            config.training.reset_model_weights_each_al_iter = false;
            config.training.policy = TrainingSetPolicyKind::OnlineSample;
        }
    }
}

impl IEmbeddingLayerSelector for ModelPreset {
    fn embedding_layer(&self) -> LayerId {
        match self {
            Self::InceptionV3 => LayerId::new("features.7"),
            Self::SqueezeNet => LayerId::new("features.0.6"),
            Self::Resnet18 | Self::OnlineResnet18 => LayerId::new("features.5"),
        }
    }
}
