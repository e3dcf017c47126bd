//! `FetchHook` - refetches when its request key changes.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::state::{FetchPhase, FetchSnapshot};
use crate::tmdb::{JsonFetcher, Request};

/// Per-consumer data-fetch hook.
///
/// Each key change starts a new cycle with its own cancellation token and
/// cancels the previous one. A superseded fetch still runs to completion, but
/// its result is dropped. Dropping the hook cancels the current cycle.
///
/// Must be used inside a tokio runtime; every cycle runs on a spawned task.
#[derive(Debug)]
pub struct FetchHook<F> {
    fetcher: Arc<F>,
    state: Arc<watch::Sender<FetchSnapshot>>,
    key: Option<Request>,
    cycle: CancellationToken,
}

impl<F> FetchHook<F>
where
    F: JsonFetcher + Send + Sync + 'static,
{
    /// Creates an idle hook.
    #[must_use]
    pub fn new(fetcher: Arc<F>) -> Self {
        let (state, _rx) = watch::channel(FetchSnapshot::idle());
        Self {
            fetcher,
            state: Arc::new(state),
            key: None,
            cycle: CancellationToken::new(),
        }
    }

    /// Creates a hook and starts fetching `key`.
    #[must_use]
    pub fn with_key(fetcher: Arc<F>, key: Request) -> Self {
        let mut hook = Self::new(fetcher);
        hook.set_key(key);
        hook
    }

    /// Switches to `key`, restarting at `Loading`.
    ///
    /// Setting the current key again does nothing.
    pub fn set_key(&mut self, key: Request) {
        if self.key.as_ref() == Some(&key) {
            return;
        }

        self.cycle.cancel();
        let token = CancellationToken::new();
        self.cycle = token.clone();
        self.state.send_replace(FetchSnapshot::loading());
        tracing::debug!(key = %key, "fetch cycle started");

        let fetcher = Arc::clone(&self.fetcher);
        let state = Arc::clone(&self.state);
        let request = key.clone();
        self.key = Some(key);

        tokio::spawn(async move {
            let outcome = fetcher.fetch_json(&request).await;
            state.send_if_modified(|snapshot| {
                if token.is_cancelled() {
                    tracing::debug!(key = %request, "discarded stale fetch result");
                    return false;
                }
                *snapshot = match outcome {
                    Ok(data) => FetchSnapshot::success(data),
                    Err(e) => {
                        tracing::debug!(key = %request, error = %e, "fetch failed");
                        FetchSnapshot::failure(e.to_string())
                    }
                };
                true
            });
        });
    }

    /// Current key, if one has been set.
    #[must_use]
    pub const fn key(&self) -> Option<&Request> {
        self.key.as_ref()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> FetchSnapshot {
        self.state.borrow().clone()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> FetchPhase {
        self.state.borrow().phase()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchSnapshot> {
        self.state.subscribe()
    }

    /// Waits until the current cycle is no longer loading.
    pub async fn settled(&self) -> FetchSnapshot {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|snapshot| !snapshot.loading).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        }
    }
}

impl<F> Drop for FetchHook<F> {
    fn drop(&mut self) {
        self.cycle.cancel();
    }
}
