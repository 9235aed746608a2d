//! State holders fed by the jobs API.
//!
//! Each store is a cheap `Clone` handle over shared state; clones observe
//! and mutate the same data. Changes are published through `tokio::sync::watch`
//! so callers can subscribe instead of polling.

pub mod degrees;
pub mod jobs;
pub mod user;

pub use degrees::DegreeStore;
pub use jobs::JobStore;
pub use user::UserFilterStore;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

/// Result of a fetch action that completed without error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The response replaced the stored collection
    Applied { count: usize },
    /// A fetch issued later already landed; this response was dropped
    Stale,
}

/// Stored value together with the fetch that produced it
#[derive(Debug)]
pub struct Snapshot<T> {
    pub value: Arc<T>,
    /// Ticket of the fetch that produced `value`, 0 before any fetch
    pub ticket: u64,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            ticket: self.ticket,
            fetched_at: self.fetched_at,
        }
    }
}

impl<T: Default> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            value: Arc::new(T::default()),
            ticket: 0,
            fetched_at: None,
        }
    }
}

/// A value replaced wholesale by fetches, guarded against out-of-order responses.
///
/// Every fetch takes a ticket before it suspends. A response is only applied
/// when its ticket is newer than the one already stored.
pub(crate) struct FetchedValue<T> {
    state: Arc<watch::Sender<Snapshot<T>>>,
    tickets: Arc<AtomicU64>,
}

impl<T> Clone for FetchedValue<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            tickets: Arc::clone(&self.tickets),
        }
    }
}

impl<T: Default> FetchedValue<T> {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self {
            state: Arc::new(state),
            tickets: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<T> FetchedValue<T> {
    pub(crate) fn issue_ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Store `value` if `ticket` is newer than the stored one; returns whether it was stored
    pub(crate) fn apply(&self, ticket: u64, value: T) -> bool {
        self.store(ticket, value, Some(Utc::now()))
    }

    /// Replace the value outside of a fetch.
    ///
    /// `fetched_at` keeps the time of the last fetch, `None` if nothing was fetched yet.
    pub(crate) fn replace(&self, value: T) {
        let ticket = self.issue_ticket();
        let fetched_at = self.state.borrow().fetched_at;
        self.store(ticket, value, fetched_at);
    }

    fn store(&self, ticket: u64, value: T, fetched_at: Option<DateTime<Utc>>) -> bool {
        self.state.send_if_modified(move |snapshot| {
            if ticket <= snapshot.ticket {
                return false;
            }
            *snapshot = Snapshot {
                value: Arc::new(value),
                ticket,
                fetched_at,
            };
            true
        })
    }

    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        self.state.borrow().clone()
    }

    pub(crate) fn value(&self) -> Arc<T> {
        Arc::clone(&self.state.borrow().value)
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_wins() {
        let value: FetchedValue<Vec<u32>> = FetchedValue::new();
        let first = value.issue_ticket();
        let second = value.issue_ticket();

        assert!(value.apply(second, vec![2]));
        assert!(!value.apply(first, vec![1]));
        assert_eq!(*value.value(), vec![2]);
        assert_eq!(value.snapshot().ticket, second);
    }

    #[test]
    fn replace_notifies_subscribers() {
        let value: FetchedValue<Vec<u32>> = FetchedValue::new();
        let mut rx = value.subscribe();
        assert!(value.snapshot().fetched_at.is_none());

        value.replace(vec![1, 2, 3]);

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update().value, vec![1, 2, 3]);
    }

    #[test]
    fn replace_is_not_a_fetch() {
        let value: FetchedValue<Vec<u32>> = FetchedValue::new();
        value.replace(vec![1]);
        assert!(value.snapshot().fetched_at.is_none());

        let ticket = value.issue_ticket();
        value.apply(ticket, vec![2]);
        let fetched_at = value.snapshot().fetched_at;
        assert!(fetched_at.is_some());

        value.replace(vec![3]);
        assert_eq!(value.snapshot().fetched_at, fetched_at);
        assert_eq!(*value.value(), vec![3]);
    }
}
