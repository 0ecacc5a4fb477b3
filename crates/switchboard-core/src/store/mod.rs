// ── Store ──
//
// Single source of truth for every slice. Owned by the application root
// and handed (as a cheap clone) to whatever dispatches; there is no global
// instance. Reducer applications are serialized by the watch channel's
// write lock, and subscribers only wake when a slice actually changed.

mod state;
mod stream;

use std::sync::Arc;

use switchboard_api::BearerToken;
use tokio::sync::watch;
use tracing::debug;

pub use state::{AppState, StoreAction, StoreSlice};
pub use stream::{StoreStream, StoreWatchStream};

use crate::client::{SliceDispatcher, Thunk};
use crate::error::CoreError;
use crate::slice::ResourceState;

#[derive(Clone)]
pub struct Store {
    inner: Arc<watch::Sender<Arc<AppState>>>,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        let (tx, _) = watch::channel(Arc::new(state));
        Self {
            inner: Arc::new(tx),
        }
    }

    /// Apply one action synchronously. Returns `true` if state changed.
    pub fn dispatch(&self, action: impl Into<StoreAction>) -> bool {
        let action = action.into();
        debug!("dispatch {action}");
        self.inner
            .send_if_modified(|state| Arc::make_mut(state).apply(action))
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<AppState> {
        self.inner.borrow().clone()
    }

    /// Read a projection of the current state without cloning it all.
    pub fn select<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&self.inner.borrow())
    }

    /// Current state of `R`'s slice.
    pub fn slice<R: StoreSlice>(&self) -> ResourceState<R> {
        self.select(|state| R::slice(state).state().clone())
    }

    /// The credential held by the auth slice, if logged in.
    pub fn token(&self) -> Option<BearerToken> {
        self.select(|state| state.auth.token().cloned())
    }

    pub fn subscribe(&self) -> StoreStream {
        StoreStream::new(self.inner.subscribe())
    }

    // ── Thunks ───────────────────────────────────────────────────────

    /// Run a resource client operation against this store.
    pub async fn run<R: StoreSlice, T: 'static>(
        &self,
        thunk: Thunk<R, T>,
    ) -> Result<T, CoreError> {
        thunk.run(SliceDispatcher::new(self.clone())).await
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("subscribers", &self.inner.receiver_count())
            .finish_non_exhaustive()
    }
}
