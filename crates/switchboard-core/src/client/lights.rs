// ── Light commands ──
//
// Single-field PATCHes that go through the same `loading_items` bracket as
// `update`, then apply the confirmed value with a light-specific reducer.

use switchboard_api::BearerToken;

use super::capability::Capability;
use super::resource_client::{ResourceClient, bracket, surface};
use super::thunk::Thunk;
use crate::error::CoreError;
use crate::model::{EntityId, Light, LightAction, UpdateLightRequest};
use crate::slice::SliceAction;

impl ResourceClient<Light> {
    /// Set brightness in percent (0 through 100).
    pub fn set_brightness(
        &self,
        token: &BearerToken,
        id: impl Into<EntityId>,
        value: u8,
    ) -> Result<Thunk<Light, Light>, CoreError> {
        let patch = UpdateLightRequest {
            brightness: Some(value),
            ..Default::default()
        };
        self.command("set_brightness", token, id.into(), patch, |light| {
            LightAction::SetBrightness {
                id: light.id.clone(),
                value: light.brightness,
            }
        })
    }

    /// Set white color temperature in kelvin (1000 through 10000).
    pub fn set_color_temperature(
        &self,
        token: &BearerToken,
        id: impl Into<EntityId>,
        kelvin: u16,
    ) -> Result<Thunk<Light, Light>, CoreError> {
        let patch = UpdateLightRequest {
            color_temperature: Some(kelvin),
            ..Default::default()
        };
        self.command("set_color_temperature", token, id.into(), patch, move |light| {
            LightAction::SetColorTemperature {
                id: light.id.clone(),
                kelvin: light.color_temperature.unwrap_or(kelvin),
            }
        })
    }

    pub fn rename(
        &self,
        token: &BearerToken,
        id: impl Into<EntityId>,
        name: impl Into<String>,
    ) -> Result<Thunk<Light, Light>, CoreError> {
        let patch = UpdateLightRequest {
            name: Some(name.into()),
            ..Default::default()
        };
        self.command("rename", token, id.into(), patch, |light| LightAction::Rename {
            id: light.id.clone(),
            name: light.name.clone(),
        })
    }

    pub fn set_power(
        &self,
        token: &BearerToken,
        id: impl Into<EntityId>,
        on: bool,
    ) -> Result<Thunk<Light, Light>, CoreError> {
        let patch = UpdateLightRequest {
            is_on: Some(on),
            ..Default::default()
        };
        self.command("set_power", token, id.into(), patch, |light| LightAction::SetPower {
            id: light.id.clone(),
            on: light.is_on,
        })
    }

    fn command(
        &self,
        operation: &'static str,
        token: &BearerToken,
        id: EntityId,
        patch: UpdateLightRequest,
        confirm: impl FnOnce(&Light) -> LightAction + Send + 'static,
    ) -> Result<Thunk<Light, Light>, CoreError> {
        self.require(Capability::Update)?;
        let client = self.clone();
        let token = token.clone();

        Ok(Thunk::new(operation, move |dispatcher| async move {
            if let Err(err) = patch.validate() {
                return Err(surface(&dispatcher, operation, Some(&id), err));
            }

            let call = client.patch_item(token, id.clone(), patch);
            bracket(&dispatcher, id, operation, call, |d, light| {
                // Lights not loaded yet have nothing to mutate in place.
                if !d.dispatch(SliceAction::Extra(confirm(light))) {
                    d.dispatch(SliceAction::Update(light.clone()));
                }
            })
            .await
        }))
    }
}
