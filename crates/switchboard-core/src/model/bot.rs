use serde::{Deserialize, Serialize};

use super::{EntityId, Resource};
use crate::slice::NoExtension;

/// A chat bot managed from the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bot {
    pub id: EntityId,
    pub full_name: String,
    #[serde(default)]
    pub username: Option<String>,
    /// Outgoing webhook; `None` until configured.
    #[serde(default)]
    pub webhook: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Resource for Bot {
    type Extension = NoExtension;

    const NAME: &'static str = "bots";
    const BASE_PATH: &'static str = "bots";
    const DISPLAY_FIELD: &'static str = "full_name";

    fn id(&self) -> EntityId {
        self.id.clone()
    }
}

/// Payload for `POST bots`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBotRequest {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
}

/// Payload for `PATCH bots/{id}`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBotRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_minimal_payload() {
        let bot: Bot =
            serde_json::from_value(json!({ "id": 1, "full_name": "Bot1", "webhook": null }))
                .unwrap();
        assert_eq!(bot.id, EntityId::Int(1));
        assert!(bot.webhook.is_none());
        assert!(bot.active);
    }

    #[test]
    fn display_name_uses_full_name() {
        let bot: Bot =
            serde_json::from_value(json!({ "id": 1, "full_name": "Helper" })).unwrap();
        assert_eq!(bot.display_name(), "Helper");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let bot: Bot = serde_json::from_value(json!({ "id": 5, "full_name": "" })).unwrap();
        assert_eq!(bot.display_name(), "5");
    }

    #[test]
    fn update_request_skips_unset_fields() {
        let req = UpdateBotRequest {
            webhook: Some("https://x".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "webhook": "https://x" })
        );
    }
}
