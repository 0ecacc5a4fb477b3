use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::EntityId;
use crate::slice::SliceExtension;

/// A backend entity type with its own slice and resource client.
///
/// `BASE_PATH` and `DISPLAY_FIELD` form the shared contract every
/// capability works against: collection requests go to `BASE_PATH`, item
/// requests to `BASE_PATH/{id}`, and log lines name items by the JSON
/// field `DISPLAY_FIELD`.
pub trait Resource:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Resource-specific reducers and state carried by this resource's slice.
    type Extension: SliceExtension<Self>;

    /// Slice name, used as the action prefix (`bots/setLoading`).
    const NAME: &'static str;

    /// Collection path relative to the backend base URL.
    const BASE_PATH: &'static str;

    /// JSON field holding a human-readable name.
    const DISPLAY_FIELD: &'static str;

    /// Merge key. Must be stable across responses.
    fn id(&self) -> EntityId;

    /// Value of `DISPLAY_FIELD`, falling back to the ID.
    fn display_name(&self) -> String {
        display_field_value(self, Self::DISPLAY_FIELD).unwrap_or_else(|| self.id().to_string())
    }
}

/// Read a top-level string field from the serialized form of `item`.
pub(crate) fn display_field_value<T: Serialize>(item: &T, field: &str) -> Option<String> {
    let value = serde_json::to_value(item).ok()?;
    match value.get(field)? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
