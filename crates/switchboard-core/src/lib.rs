//! Resource clients and state slices behind the Switchboard dashboard.
//!
//! - **[`Slice<R>`]** gives every resource type the same collection
//!   bookkeeping: fetched `results`, a `loading` flag, per-item
//!   `loading_items`, surfaced `errors`, selection and a create-dialog flag.
//!   Transitions are [`SliceAction`] variants applied by a pure reducer;
//!   resources add their own through [`SliceExtension`].
//!
//! - **[`ResourceClient<R>`]** is composed from a [`CapabilitySet`] (List,
//!   Detail, Create, Update, Delete) plus the token capability, which the
//!   builder requires at compile time. Operations return a [`Thunk`] that
//!   performs the HTTP call and dispatches into `R`'s slice when run.
//!
//! - **[`Store`]** aggregates the auth slice and one slice per resource
//!   into an [`AppState`] behind a `watch` channel; views read snapshots or
//!   subscribe through a [`StoreStream`].
//!
//! - **[`Dashboard`]** is the application root tying the three together.

pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod slice;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::{AuthAction, AuthState};
pub use client::{
    Capability, CapabilitySet, ResourceClient, ResourceClientBuilder, SliceDispatcher, Thunk,
};
pub use config::{ClientConfig, TlsVerification};
pub use dashboard::{Dashboard, DashboardResource};
pub use error::{CoreError, ErrorKind, ErrorPayload};
pub use slice::{NoExtension, ResourceState, Slice, SliceAction, SliceExtension};
pub use store::{AppState, Store, StoreAction, StoreSlice, StoreStream};

pub use model::{
    Bot, CreateBotRequest, CreateTrainingJobRequest, EntityId, Light, LightAction,
    LightExtraState, Resource, TrainingJob, TrainingStatus, UpdateBotRequest, UpdateLightRequest,
};

// Transport types callers need to build a client by hand.
pub use switchboard_api::{
    AuthScheme, BearerToken, Error as ApiError, RestClient, TransportConfig,
};
