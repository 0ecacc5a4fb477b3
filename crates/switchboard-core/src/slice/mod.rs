// ── Slice factory ──
//
// Uniform collection bookkeeping (what's loading, what failed, what's
// selected) for every resource type, with resource-specific extensions
// plugged in through `SliceExtension`.

mod action;
mod reducer;
mod state;

use std::convert::Infallible;
use std::fmt;

use tracing::trace;

pub use action::SliceAction;
pub use reducer::reduce;
pub use state::ResourceState;

use crate::model::Resource;

/// Extra state carried by a resource's slice.
pub type ExtraState<R> = <<R as Resource>::Extension as SliceExtension<R>>::State;

/// Extra actions accepted by a resource's slice.
pub type ExtraAction<R> = <<R as Resource>::Extension as SliceExtension<R>>::Action;

/// Resource-specific reducers layered on top of the base reducers.
///
/// Implementations see the same [`ResourceState`] but can only change
/// items (through [`ResourceState::modify_item`]) and their own extra
/// state, so the `loading_items` / `errors` bookkeeping stays uniform.
pub trait SliceExtension<R: Resource>: Send + Sync + 'static {
    type State: fmt::Debug + Clone + Default + PartialEq + Send + Sync;
    type Action: fmt::Debug + Clone + PartialEq + Send + Sync;

    fn action_name(action: &Self::Action) -> &'static str;

    /// Apply `action`, returning `true` if the state changed.
    fn reduce(state: &mut ResourceState<R>, action: Self::Action) -> bool;
}

/// Extension for resources that only need the base reducers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExtension;

impl<R: Resource> SliceExtension<R> for NoExtension {
    type State = ();
    type Action = Infallible;

    fn action_name(action: &Infallible) -> &'static str {
        match *action {}
    }

    fn reduce(_state: &mut ResourceState<R>, action: Infallible) -> bool {
        match action {}
    }
}

/// A named state container for one resource type.
///
/// Owns its [`ResourceState`] exclusively; the only way to change it is
/// [`dispatch`](Self::dispatch).
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<R: Resource> {
    name: &'static str,
    state: ResourceState<R>,
}

impl<R: Resource> Slice<R> {
    /// Slice with the default initial state.
    pub fn new(name: &'static str) -> Self {
        Self::with_extra_state(name, Default::default())
    }

    /// Slice whose extension state starts from `extra`.
    pub fn with_extra_state(name: &'static str, extra: ExtraState<R>) -> Self {
        Self {
            name,
            state: ResourceState::new(extra),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> &ResourceState<R> {
        &self.state
    }

    /// Apply one action. Returns `true` if the state changed.
    pub fn dispatch(&mut self, action: SliceAction<R>) -> bool {
        trace!(slice = self.name, action = action.name(), "reduce");
        reduce(&mut self.state, action)
    }
}

impl<R: Resource> Default for Slice<R> {
    fn default() -> Self {
        Self::new(R::NAME)
    }
}
