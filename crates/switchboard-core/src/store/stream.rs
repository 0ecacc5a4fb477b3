// ── Store subscriptions ──

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::AppState;

/// A subscription to the whole read-model.
///
/// Provides point-in-time snapshot access and change notification via
/// [`changed`](Self::changed) or by converting to a `Stream`. Only
/// dispatches that actually changed a slice wake subscribers.
pub struct StoreStream {
    current: Arc<AppState>,
    receiver: watch::Receiver<Arc<AppState>>,
}

impl StoreStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<AppState>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Snapshot captured at creation (or at the last `changed`).
    pub fn current(&self) -> &Arc<AppState> {
        &self.current
    }

    /// Latest snapshot, which may be newer than `current`.
    pub fn latest(&self) -> Arc<AppState> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<AppState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    ///
    /// The first item is the current snapshot.
    pub fn into_stream(self) -> StoreWatchStream {
        StoreWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct StoreWatchStream {
    inner: WatchStream<Arc<AppState>>,
}

impl Stream for StoreWatchStream {
    type Item = Arc<AppState>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
