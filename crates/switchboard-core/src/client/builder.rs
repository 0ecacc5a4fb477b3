// ── Resource client composition ──
//
// Capabilities are collected into a set; the token capability is tracked
// in the builder's type, so `build()` only exists once it is attached.

use std::marker::PhantomData;

use switchboard_api::{AuthScheme, RestClient};

use super::capability::{Capability, CapabilitySet};
use super::resource_client::ResourceClient;
use crate::store::StoreSlice;

/// Type-state: no token capability yet.
#[derive(Debug, Clone, Copy)]
pub struct NoToken;

/// Type-state: token capability attached with this header scheme.
#[derive(Debug, Clone, Copy)]
pub struct WithToken(AuthScheme);

/// Composes a [`ResourceClient`] from capabilities.
///
/// ```no_run
/// use switchboard_core::{Bot, Capability, ResourceClient, RestClient, TransportConfig};
/// use switchboard_core::AuthScheme;
///
/// # fn main() -> Result<(), switchboard_core::ApiError> {
/// let rest = RestClient::new("https://dash.example.com/api/", &TransportConfig::default())?;
/// let bots = ResourceClient::<Bot>::builder(rest)
///     .update()
///     .list()
///     .detail()
///     .token(AuthScheme::Bearer)
///     .build();
/// assert!(bots.supports(Capability::Update));
/// # Ok(())
/// # }
/// ```
///
/// Leaving out the token capability is a compile error:
///
/// ```compile_fail
/// use switchboard_core::{Bot, ResourceClient, RestClient, TransportConfig};
///
/// let rest = RestClient::new("https://dash.example.com/api/", &TransportConfig::default()).unwrap();
/// let bots = ResourceClient::<Bot>::builder(rest).list().build();
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct ResourceClientBuilder<R, A = NoToken> {
    rest: RestClient,
    capabilities: CapabilitySet,
    auth: A,
    _resource: PhantomData<fn() -> R>,
}

impl<R: StoreSlice> ResourceClientBuilder<R, NoToken> {
    pub fn new(rest: RestClient) -> Self {
        Self {
            rest,
            capabilities: CapabilitySet::new(),
            auth: NoToken,
            _resource: PhantomData,
        }
    }

    /// Attach the token capability. Every request carries
    /// `Authorization: {scheme} {token}`.
    pub fn token(self, scheme: AuthScheme) -> ResourceClientBuilder<R, WithToken> {
        ResourceClientBuilder {
            rest: self.rest,
            capabilities: self.capabilities,
            auth: WithToken(scheme),
            _resource: PhantomData,
        }
    }
}

impl<R: StoreSlice, A> ResourceClientBuilder<R, A> {
    pub fn capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn capabilities(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities.extend(capabilities);
        self
    }

    pub fn list(self) -> Self {
        self.capability(Capability::List)
    }

    pub fn detail(self) -> Self {
        self.capability(Capability::Detail)
    }

    pub fn create(self) -> Self {
        self.capability(Capability::Create)
    }

    pub fn update(self) -> Self {
        self.capability(Capability::Update)
    }

    pub fn delete(self) -> Self {
        self.capability(Capability::Delete)
    }
}

impl<R: StoreSlice> ResourceClientBuilder<R, WithToken> {
    pub fn build(self) -> ResourceClient<R> {
        ResourceClient::new(self.rest, self.capabilities, self.auth.0)
    }
}
