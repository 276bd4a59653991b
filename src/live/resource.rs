//! Live Resource
//!
//! One server-owned value held by a view, with the fetch bookkeeping every
//! view needs: a loading flag, a user-visible error string, a stale marker,
//! and supersession of in-flight fetches.
//!
//! Every fetch takes a generation ticket. Starting a new fetch (or writing a
//! mutation result) bumps the generation and aborts the previous task, and a
//! finished fetch only writes state if its ticket is still current. A slow
//! old response can therefore never overwrite a newer one.

use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tokio::task::{AbortHandle, JoinHandle};

use crate::config::FetchErrorPolicy;

const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Point-in-time copy of a resource's state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    /// `data` survived a failed refresh and may be out of date
    pub stale: bool,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            stale: false,
        }
    }
}

/// How a fetch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed(String),
    /// A newer fetch or mutation took over; nothing was written
    Superseded,
}

struct Shared<T> {
    state: RwLock<Snapshot<T>>,
    generation: AtomicU64,
    inflight: Mutex<Option<AbortHandle>>,
    policy: FetchErrorPolicy,
}

impl<T> Shared<T> {
    /// Invalidate every outstanding ticket and abort the running fetch
    fn supersede(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.take_inflight() {
            previous.abort();
        }
        generation
    }

    fn take_inflight(&self) -> Option<AbortHandle> {
        match self.inflight.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }

    /// Register the task for `generation`. A task whose generation was
    /// already superseded aborts itself instead of displacing the newer one.
    fn set_inflight(&self, generation: u64, handle: AbortHandle) {
        let mut slot = match self.inflight.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if self.generation.load(Ordering::SeqCst) != generation {
            handle.abort();
            return;
        }
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    async fn settle(&self, generation: u64, result: Result<T, String>) -> LoadOutcome {
        let mut state = self.state.write().await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "Discarding superseded fetch result");
            return LoadOutcome::Superseded;
        }

        state.loading = false;
        match result {
            Ok(data) => {
                state.data = Some(data);
                state.error = None;
                state.stale = false;
                LoadOutcome::Applied
            }
            Err(message) => {
                let message = if message.trim().is_empty() {
                    DEFAULT_FAILURE_MESSAGE.to_string()
                } else {
                    message
                };
                match self.policy {
                    FetchErrorPolicy::Retain => state.stale = state.data.is_some(),
                    FetchErrorPolicy::Clear => {
                        state.data = None;
                        state.stale = false;
                    }
                }
                state.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }
}

/// A view-owned server resource. Dropping it aborts any in-flight fetch.
pub struct LiveResource<T> {
    shared: Arc<Shared<T>>,
}

impl<T> LiveResource<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(policy: FetchErrorPolicy) -> Self {
        Self::from_snapshot(Snapshot::default(), policy)
    }

    /// Start with a value already present (e.g. from a shared cache)
    pub fn seeded(data: T, policy: FetchErrorPolicy) -> Self {
        Self::from_snapshot(
            Snapshot {
                data: Some(data),
                ..Snapshot::default()
            },
            policy,
        )
    }

    fn from_snapshot(snapshot: Snapshot<T>, policy: FetchErrorPolicy) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(snapshot),
                generation: AtomicU64::new(0),
                inflight: Mutex::new(None),
                policy,
            }),
        }
    }

    /// Start a fetch, superseding any fetch already in flight.
    ///
    /// The fetch runs on its own task; awaiting the returned handle is
    /// optional. An aborted handle resolves to a cancellation `JoinError`.
    pub async fn load<F>(&self, fetch: F) -> JoinHandle<LoadOutcome>
    where
        F: Future<Output = Result<T, String>> + Send + 'static,
    {
        let generation = self.shared.supersede();
        self.shared.state.write().await.loading = true;

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            let result = fetch.await;
            shared.settle(generation, result).await
        });
        self.shared.set_inflight(generation, handle.abort_handle());
        handle
    }

    /// Start a fetch and wait for it to finish
    pub async fn load_and_wait<F>(&self, fetch: F) -> LoadOutcome
    where
        F: Future<Output = Result<T, String>> + Send + 'static,
    {
        match self.load(fetch).await.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => LoadOutcome::Superseded,
            Err(e) => {
                tracing::error!(error = %e, "Fetch task panicked");
                self.shared.state.write().await.loading = false;
                LoadOutcome::Failed(DEFAULT_FAILURE_MESSAGE.to_string())
            }
        }
    }

    /// Write a mutation result. It is newer than anything a pending fetch
    /// could return, so pending fetches are superseded.
    pub async fn replace(&self, data: T) {
        self.shared.supersede();
        let mut state = self.shared.state.write().await;
        state.data = Some(data);
        state.loading = false;
        state.error = None;
        state.stale = false;
    }

    /// Edit the held value in place after a mutation; supersedes pending fetches
    pub async fn modify<F>(&self, f: F)
    where
        F: FnOnce(&mut Option<T>),
    {
        self.shared.supersede();
        let mut state = self.shared.state.write().await;
        f(&mut state.data);
        state.loading = false;
    }

    /// Read the current state without cloning it
    pub async fn read<R>(&self, f: impl FnOnce(&Snapshot<T>) -> R) -> R {
        let state = self.shared.state.read().await;
        f(&state)
    }

    /// Abort any in-flight fetch and clear the loading flag
    pub async fn cancel(&self) {
        self.shared.supersede();
        self.shared.state.write().await.loading = false;
    }
}

impl<T> LiveResource<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub async fn snapshot(&self) -> Snapshot<T> {
        self.shared.state.read().await.clone()
    }

    pub async fn data(&self) -> Option<T> {
        self.shared.state.read().await.data.clone()
    }
}

impl<T> Drop for LiveResource<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.shared.take_inflight() {
            handle.abort();
        }
    }
}
