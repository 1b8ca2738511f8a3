//! Roster provider seam.
//!
//! The gallery never owns the roster. It reads full snapshots from a
//! [`RosterProvider`] and listens for change notifications. Every registration
//! is identified by the [`ListenerId`] returned from `subscribe`, and
//! `unsubscribe` removes exactly that registration.

use crate::participant::Participant;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Roster change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterEvent {
    UserAdded,
    UserUpdated,
    UserRemoved,
}

impl RosterEvent {
    /// Every event kind, in a stable order.
    pub const ALL: [RosterEvent; 3] = [
        RosterEvent::UserAdded,
        RosterEvent::UserUpdated,
        RosterEvent::UserRemoved,
    ];

    /// Bounded label for metrics and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RosterEvent::UserAdded => "user_added",
            RosterEvent::UserUpdated => "user_updated",
            RosterEvent::UserRemoved => "user_removed",
        }
    }
}

impl fmt::Display for RosterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Callback invoked when the roster changes.
pub type RosterListener = Arc<dyn Fn(RosterEvent) + Send + Sync>;

/// Source of roster snapshots and change notifications.
pub trait RosterProvider: Send + Sync {
    /// Every participant currently in the call, in provider order.
    fn all_participants(&self) -> Vec<Participant>;

    /// The viewer, or `None` if not known yet.
    fn local_user(&self) -> Option<Participant>;

    /// Register `listener` for `event`.
    fn subscribe(&self, event: RosterEvent, listener: RosterListener) -> ListenerId;

    /// Remove the registration `id` for `event`.
    ///
    /// Idempotent. Returns whether a registration was removed.
    fn unsubscribe(&self, event: RosterEvent, id: ListenerId) -> bool;
}

/// Thread-safe listener table a [`RosterProvider`] can embed.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(ListenerId, RosterEvent, RosterListener)>>,
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listener_count", &self.listener_count())
            .finish_non_exhaustive()
    }
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `event` and return its identity.
    pub fn subscribe(&self, event: RosterEvent, listener: RosterListener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, event, listener));
        id
    }

    /// Remove the registration matching both `event` and `id`.
    pub fn unsubscribe(&self, event: RosterEvent, id: ListenerId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|(listener_id, listener_event, _)| {
            !(*listener_id == id && *listener_event == event)
        });
        listeners.len() != before
    }

    /// Invoke every listener registered for `event`.
    ///
    /// Listeners run outside the lock, so they may subscribe or unsubscribe.
    /// Returns the number of listeners invoked.
    pub fn emit(&self, event: RosterEvent) -> usize {
        let targets: Vec<RosterListener> = self
            .lock()
            .iter()
            .filter(|(_, listener_event, _)| *listener_event == event)
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();

        for listener in &targets {
            listener(event);
        }
        targets.len()
    }

    /// Total number of registrations across all events.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock().len()
    }

    /// Number of registrations for `event`.
    #[must_use]
    pub fn listener_count_for(&self, event: RosterEvent) -> usize {
        self.lock()
            .iter()
            .filter(|(_, listener_event, _)| *listener_event == event)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(ListenerId, RosterEvent, RosterListener)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
