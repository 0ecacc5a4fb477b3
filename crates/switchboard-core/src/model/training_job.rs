use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, Resource};
use crate::slice::NoExtension;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrainingStatus {
    #[default]
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl TrainingStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// A training run for one bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingJob {
    pub id: EntityId,
    pub bot: EntityId,
    pub title: String,
    #[serde(default)]
    pub status: TrainingStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for TrainingJob {
    type Extension = NoExtension;

    const NAME: &'static str = "trainingJobs";
    const BASE_PATH: &'static str = "training-jobs";
    const DISPLAY_FIELD: &'static str = "title";

    fn id(&self) -> EntityId {
        self.id.clone()
    }
}

/// Payload for `POST training-jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrainingJobRequest {
    pub bot: EntityId,
    pub title: String,
}
