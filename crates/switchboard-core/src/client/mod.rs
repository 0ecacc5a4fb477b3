// ── Resource clients ──
//
// Composable per-resource façades. A client is a capability set plus the
// token capability; its operations return thunks that run against a store.

mod builder;
mod capability;
mod lights;
mod resource_client;
mod thunk;

pub use builder::{NoToken, ResourceClientBuilder, WithToken};
pub use capability::{Capability, CapabilitySet};
pub use resource_client::ResourceClient;
pub use thunk::{SliceDispatcher, Thunk};
