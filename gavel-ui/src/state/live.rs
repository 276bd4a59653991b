//! Live Resources
//!
//! Reactive holder for one piece of server data. A fetch takes a generation
//! ticket when it starts and only writes back if no newer fetch or mutation
//! has happened since. Failed refreshes keep the last good value and mark it
//! stale.

use gloo_timers::callback::Timeout;
use leptos::*;
use std::future::Future;

/// Monotonic fetch counter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    /// Invalidate outstanding tickets and hand out a new one
    pub fn advance(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// Empty server messages get a generic one
pub fn failure_message(message: String) -> String {
    if message.trim().is_empty() {
        "Request failed".to_string()
    } else {
        message
    }
}

pub struct LiveResource<T: 'static> {
    pub data: RwSignal<Option<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub stale: RwSignal<bool>,
    generation: StoredValue<Generation>,
}

impl<T: 'static> Clone for LiveResource<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for LiveResource<T> {}

impl<T: Clone + 'static> LiveResource<T> {
    pub fn new() -> Self {
        Self {
            data: create_rw_signal(None),
            loading: create_rw_signal(false),
            error: create_rw_signal(None),
            stale: create_rw_signal(false),
            generation: store_value(Generation::default()),
        }
    }

    fn next_ticket(&self) -> u64 {
        let mut ticket = 0;
        self.generation.update_value(|g| ticket = g.advance());
        ticket
    }

    /// Start a fetch; any fetch already running loses the right to write
    pub fn load<F>(&self, fetch: F)
    where
        F: Future<Output = Result<T, String>> + 'static,
    {
        let ticket = self.next_ticket();
        let this = *self;
        this.loading.set(true);

        spawn_local(async move {
            let result = fetch.await;

            // The page may have been unmounted while the request was out.
            let current = this
                .generation
                .try_with_value(|g| g.is_current(ticket))
                .unwrap_or(false);
            if !current {
                return;
            }

            this.loading.set(false);
            match result {
                Ok(value) => {
                    this.data.set(Some(value));
                    this.error.set(None);
                    this.stale.set(false);
                }
                Err(message) => {
                    this.stale.set(this.data.with_untracked(Option::is_some));
                    this.error.set(Some(failure_message(message)));
                }
            }
        });
    }

    /// Forget the held value and supersede any running fetch (route change)
    pub fn reset(&self) {
        self.next_ticket();
        self.data.set(None);
        self.loading.set(false);
        self.error.set(None);
        self.stale.set(false);
    }

    /// Write a mutation result returned by the server
    pub fn replace(&self, value: T) {
        self.next_ticket();
        self.data.set(Some(value));
        self.loading.set(false);
        self.error.set(None);
        self.stale.set(false);
    }

    /// Edit the held value after a mutation (e.g. append a created item)
    pub fn modify(&self, f: impl FnOnce(&mut Option<T>)) {
        self.next_ticket();
        self.data.update(f);
        self.loading.set(false);
    }
}

/// Whether a mutation issued for record `issued` may still write back. False
/// once the route points at another record or the page is gone.
pub fn same_route(route: Memo<String>, issued: &str) -> bool {
    route
        .try_with_untracked(|current| current == issued)
        .unwrap_or(false)
}

/// Trailing-edge debounce: each call restarts the timer, only the last
/// callback runs.
#[derive(Clone, Copy)]
pub struct Debounce {
    pending: StoredValue<Option<Timeout>>,
    delay_ms: u32,
}

impl Debounce {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            pending: store_value(None),
            delay_ms,
        }
    }

    pub fn call(&self, f: impl FnOnce() + 'static) {
        let delay = self.delay_ms;
        // Dropping the previous Timeout clears it.
        self.pending
            .update_value(|slot| *slot = Some(Timeout::new(delay, f)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_tickets() {
        let mut generation = Generation::default();
        let first = generation.advance();
        assert!(generation.is_current(first));

        let second = generation.advance();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_same_route_after_navigation() {
        let runtime = create_runtime();
        let path = create_rw_signal("a".to_string());
        let route = create_memo(move |_| path.get());
        assert!(same_route(route, "a"));

        path.set("b".to_string());
        assert!(!same_route(route, "a"));
        assert!(same_route(route, "b"));

        runtime.dispose();
    }

    #[test]
    fn test_replace_writes_server_copy() {
        let runtime = create_runtime();
        let resource = LiveResource::<u32>::new();
        resource.error.set(Some("Failed to load auction".to_string()));
        resource.stale.set(true);

        resource.replace(7);
        assert_eq!(resource.data.get_untracked(), Some(7));
        assert!(resource.error.get_untracked().is_none());
        assert!(!resource.stale.get_untracked());

        resource.reset();
        assert!(resource.data.get_untracked().is_none());

        runtime.dispose();
    }

    #[test]
    fn test_failure_message() {
        assert_eq!(failure_message(String::new()), "Request failed");
        assert_eq!(failure_message("Failed to place bid".into()), "Failed to place bid");
    }
}
