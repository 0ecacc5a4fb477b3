use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::{EntityId, Resource};
use crate::error::CoreError;
use crate::slice::{ResourceState, SliceExtension};

pub const MAX_BRIGHTNESS: u8 = 100;
pub const KELVIN_RANGE: RangeInclusive<u16> = 1000..=10_000;

/// A smart light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub is_on: bool,
    /// Percent, 0 through 100.
    #[serde(default)]
    pub brightness: u8,
    /// Kelvin. `None` for lights without white tuning.
    #[serde(default)]
    pub color_temperature: Option<u16>,
    #[serde(default)]
    pub room: Option<String>,
}

impl Resource for Light {
    type Extension = LightExtension;

    const NAME: &'static str = "lights";
    const BASE_PATH: &'static str = "lights";
    const DISPLAY_FIELD: &'static str = "name";

    fn id(&self) -> EntityId {
        self.id.clone()
    }
}

/// Payload for `PATCH lights/{id}`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateLightRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_temperature: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl UpdateLightRequest {
    /// Reject out-of-range values before anything goes on the wire.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(value) = self.brightness {
            validate_brightness(value)?;
        }
        if let Some(kelvin) = self.color_temperature {
            validate_color_temperature(kelvin)?;
        }
        Ok(())
    }
}

pub fn validate_brightness(value: u8) -> Result<(), CoreError> {
    if value > MAX_BRIGHTNESS {
        return Err(CoreError::validation(format!(
            "brightness must be between 0 and {MAX_BRIGHTNESS}, got {value}"
        )));
    }
    Ok(())
}

pub fn validate_color_temperature(kelvin: u16) -> Result<(), CoreError> {
    if !KELVIN_RANGE.contains(&kelvin) {
        return Err(CoreError::validation(format!(
            "color temperature must be between {}K and {}K, got {kelvin}K",
            KELVIN_RANGE.start(),
            KELVIN_RANGE.end()
        )));
    }
    Ok(())
}

// ── Light-specific reducers ──────────────────────────────────────────

/// Device commands confirmed by the backend, applied to one light by ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LightAction {
    SetBrightness { id: EntityId, value: u8 },
    SetColorTemperature { id: EntityId, kelvin: u16 },
    Rename { id: EntityId, name: String },
    SetPower { id: EntityId, on: bool },
}

impl LightAction {
    pub fn id(&self) -> &EntityId {
        match self {
            Self::SetBrightness { id, .. }
            | Self::SetColorTemperature { id, .. }
            | Self::Rename { id, .. }
            | Self::SetPower { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightExtraState {
    /// Most recently applied device command.
    pub last_command: Option<LightAction>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LightExtension;

impl SliceExtension<Light> for LightExtension {
    type State = LightExtraState;
    type Action = LightAction;

    fn action_name(action: &LightAction) -> &'static str {
        match action {
            LightAction::SetBrightness { .. } => "setBrightness",
            LightAction::SetColorTemperature { .. } => "setColorTemperature",
            LightAction::Rename { .. } => "rename",
            LightAction::SetPower { .. } => "toggle",
        }
    }

    fn reduce(state: &mut ResourceState<Light>, action: LightAction) -> bool {
        let found = match &action {
            LightAction::SetBrightness { id, value } => {
                state.modify_item(id, |light| light.brightness = *value)
            }
            LightAction::SetColorTemperature { id, kelvin } => {
                state.modify_item(id, |light| light.color_temperature = Some(*kelvin))
            }
            LightAction::Rename { id, name } => {
                state.modify_item(id, |light| light.name.clone_from(name))
            }
            LightAction::SetPower { id, on } => state.modify_item(id, |light| light.is_on = *on),
        };
        if found {
            state.extra_mut().last_command = Some(action);
        }
        found
    }
}
