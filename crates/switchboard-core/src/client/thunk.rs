// ── Deferred operations ──
//
// A resource client operation returns a `Thunk` instead of doing any
// work. Running it against a store hands it a `SliceDispatcher` scoped to
// the resource's own slice, so an operation can read the auth token but
// cannot write to any other slice.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use futures_util::future::BoxFuture;
use switchboard_api::BearerToken;

use crate::error::CoreError;
use crate::slice::{ResourceState, SliceAction};
use crate::store::{Store, StoreSlice};

type ThunkFn<R, T> =
    Box<dyn FnOnce(SliceDispatcher<R>) -> BoxFuture<'static, Result<T, CoreError>> + Send>;

/// A dispatchable unit of work for `R`'s slice, yielding `T`.
///
/// Nothing happens until it is passed to [`Store::run`]. Failures are both
/// dispatched into the slice's `errors` and returned.
#[must_use = "a thunk does nothing until run against a store"]
pub struct Thunk<R: StoreSlice, T = ()> {
    operation: &'static str,
    run: ThunkFn<R, T>,
}

impl<R: StoreSlice, T: 'static> Thunk<R, T> {
    pub(crate) fn new<F, Fut>(operation: &'static str, f: F) -> Self
    where
        F: FnOnce(SliceDispatcher<R>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        Self {
            operation,
            run: Box::new(move |dispatcher| Box::pin(f(dispatcher))),
        }
    }

    /// Operation name, e.g. `get_item`.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub(crate) async fn run(self, dispatcher: SliceDispatcher<R>) -> Result<T, CoreError> {
        (self.run)(dispatcher).await
    }
}

impl<R: StoreSlice, T> fmt::Debug for Thunk<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thunk")
            .field("resource", &R::NAME)
            .field("operation", &self.operation)
            .finish_non_exhaustive()
    }
}

/// Write access to exactly one slice, read access to the auth token.
pub struct SliceDispatcher<R: StoreSlice> {
    store: Store,
    _slice: PhantomData<fn() -> R>,
}

impl<R: StoreSlice> SliceDispatcher<R> {
    pub(crate) fn new(store: Store) -> Self {
        Self {
            store,
            _slice: PhantomData,
        }
    }

    pub fn dispatch(&self, action: SliceAction<R>) -> bool {
        self.store.dispatch(R::wrap(action))
    }

    pub fn state(&self) -> ResourceState<R> {
        self.store.slice::<R>()
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.store.token()
    }
}

impl<R: StoreSlice> Clone for SliceDispatcher<R> {
    fn clone(&self) -> Self {
        Self::new(self.store.clone())
    }
}
