// ── Aggregated read-model ──
//
// One slice per resource type plus the auth slice. `StoreAction` routes a
// dispatched action to exactly one of them; there are no cross-slice
// transitions.

use std::fmt;

use crate::auth::{self, AuthAction, AuthState};
use crate::model::{Bot, Light, Resource, TrainingJob};
use crate::slice::{Slice, SliceAction};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub bots: Slice<Bot>,
    pub lights: Slice<Light>,
    pub training_jobs: Slice<TrainingJob>,
}

impl AppState {
    /// Route `action` to its slice. Returns `true` if that slice changed.
    pub(crate) fn apply(&mut self, action: StoreAction) -> bool {
        match action {
            StoreAction::Auth(action) => auth::reduce(&mut self.auth, action),
            StoreAction::Bots(action) => self.bots.dispatch(action),
            StoreAction::Lights(action) => self.lights.dispatch(action),
            StoreAction::TrainingJobs(action) => self.training_jobs.dispatch(action),
        }
    }
}

/// Anything the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    Auth(AuthAction),
    Bots(SliceAction<Bot>),
    Lights(SliceAction<Light>),
    TrainingJobs(SliceAction<TrainingJob>),
}

impl StoreAction {
    pub fn slice_name(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Bots(_) => Bot::NAME,
            Self::Lights(_) => Light::NAME,
            Self::TrainingJobs(_) => TrainingJob::NAME,
        }
    }

    pub fn action_name(&self) -> &'static str {
        match self {
            Self::Auth(action) => action.name(),
            Self::Bots(action) => action.name(),
            Self::Lights(action) => action.name(),
            Self::TrainingJobs(action) => action.name(),
        }
    }
}

/// `bots/setLoadingItems`
impl fmt::Display for StoreAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.slice_name(), self.action_name())
    }
}

impl From<AuthAction> for StoreAction {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

// ── Resource ↔ slice wiring ──────────────────────────────────────────

/// A resource with a slice in [`AppState`].
pub trait StoreSlice: Resource {
    fn slice(state: &AppState) -> &Slice<Self>;

    fn wrap(action: SliceAction<Self>) -> StoreAction;
}

macro_rules! store_slice {
    ($resource:ty, $field:ident, $variant:ident) => {
        impl StoreSlice for $resource {
            fn slice(state: &AppState) -> &Slice<Self> {
                &state.$field
            }

            fn wrap(action: SliceAction<Self>) -> StoreAction {
                StoreAction::$variant(action)
            }
        }

        impl From<SliceAction<$resource>> for StoreAction {
            fn from(action: SliceAction<$resource>) -> Self {
                StoreAction::$variant(action)
            }
        }
    };
}

store_slice!(Bot, bots, Bots);
store_slice!(Light, lights, Lights);
store_slice!(TrainingJob, training_jobs, TrainingJobs);
