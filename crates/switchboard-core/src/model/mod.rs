// ── Domain model ──
//
// One type per backend entity, each implementing `Resource` so it can
// back a slice and a resource client.

pub mod bot;
pub mod entity_id;
pub mod light;
pub mod resource;
pub mod training_job;

// ── Re-exports ──────────────────────────────────────────────────────

pub use entity_id::EntityId;
pub use resource::Resource;

pub use bot::{Bot, CreateBotRequest, UpdateBotRequest};
pub use light::{Light, LightAction, LightExtension, LightExtraState, UpdateLightRequest};
pub use training_job::{CreateTrainingJobRequest, TrainingJob, TrainingStatus};
