//! In-memory roster provider for gallery testing.
//!
//! `MockRoster` stores a participant list and fires the matching
//! `RosterEvent` on every mutation, the way a conferencing client would.
//!
//! # Example
//!
//! ```rust,ignore
//! use gallery_test_utils::{MockRoster, TestParticipant};
//!
//! let roster = MockRoster::new()
//!     .with_local_user(TestParticipant::new(1).build())
//!     .with_participant(TestParticipant::new(2).video_on().build())
//!     .shared();
//!
//! roster.set_video(2, false); // fires UserUpdated
//! ```

use common::types::UserId;
use gallery_view::{ListenerId, ListenerRegistry, Participant, RosterEvent, RosterListener, RosterProvider};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct RosterState {
    participants: Vec<Participant>,
    local_user_id: Option<UserId>,
}

/// Mock roster provider.
#[derive(Debug, Default)]
pub struct MockRoster {
    state: Mutex<RosterState>,
    registry: ListenerRegistry,
    snapshot_reads: AtomicUsize,
}

impl MockRoster {
    /// Create an empty roster with no local user.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant without notifying anyone.
    #[must_use]
    pub fn with_participant(self, participant: Participant) -> Self {
        self.state.lock().unwrap().participants.push(participant);
        self
    }

    /// Add several participants without notifying anyone.
    #[must_use]
    pub fn with_participants(self, participants: impl IntoIterator<Item = Participant>) -> Self {
        self.state.lock().unwrap().participants.extend(participants);
        self
    }

    /// Add the local user to the roster and mark them as the viewer.
    #[must_use]
    pub fn with_local_user(self, participant: Participant) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.local_user_id = Some(participant.user_id);
            state.participants.push(participant);
        }
        self
    }

    /// Wrap in an `Arc` for sharing with a coordinator.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Append a participant and fire `UserAdded`.
    pub fn add_participant(&self, participant: Participant) {
        self.state.lock().unwrap().participants.push(participant);
        self.registry.emit(RosterEvent::UserAdded);
    }

    /// Replace the participant with the same identifier and fire `UserUpdated`.
    ///
    /// Returns `false` (and fires nothing) if no such participant exists.
    pub fn update_participant(&self, participant: Participant) -> bool {
        let updated = {
            let mut state = self.state.lock().unwrap();
            match state
                .participants
                .iter_mut()
                .find(|p| p.user_id == participant.user_id)
            {
                Some(slot) => {
                    *slot = participant;
                    true
                }
                None => false,
            }
        };

        if updated {
            self.registry.emit(RosterEvent::UserUpdated);
        }
        updated
    }

    /// Toggle a participant's camera and fire `UserUpdated`.
    pub fn set_video(&self, user_id: u32, video_on: bool) -> bool {
        let current = self
            .state
            .lock()
            .unwrap()
            .participants
            .iter()
            .find(|p| p.user_id == UserId(user_id))
            .cloned();

        match current {
            Some(mut participant) => {
                participant.video_on = video_on;
                self.update_participant(participant)
            }
            None => false,
        }
    }

    /// Remove a participant and fire `UserRemoved`.
    pub fn remove_participant(&self, user_id: u32) -> bool {
        let removed = {
            let mut state = self.state.lock().unwrap();
            let before = state.participants.len();
            state.participants.retain(|p| p.user_id != UserId(user_id));
            state.participants.len() != before
        };

        if removed {
            self.registry.emit(RosterEvent::UserRemoved);
        }
        removed
    }

    /// Mark an existing participant as the local user and fire `UserUpdated`.
    pub fn set_local_user(&self, user_id: u32) {
        self.state.lock().unwrap().local_user_id = Some(UserId(user_id));
        self.registry.emit(RosterEvent::UserUpdated);
    }

    /// Fire `event` without changing the roster. Returns the number of listeners invoked.
    pub fn emit(&self, event: RosterEvent) -> usize {
        self.registry.emit(event)
    }

    /// Number of live listener registrations.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.listener_count()
    }

    /// Number of live registrations for `event`.
    #[must_use]
    pub fn listener_count_for(&self, event: RosterEvent) -> usize {
        self.registry.listener_count_for(event)
    }

    /// How many times `all_participants` has been called.
    #[must_use]
    pub fn snapshot_reads(&self) -> usize {
        self.snapshot_reads.load(Ordering::SeqCst)
    }
}

impl RosterProvider for MockRoster {
    fn all_participants(&self) -> Vec<Participant> {
        self.snapshot_reads.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap().participants.clone()
    }

    fn local_user(&self) -> Option<Participant> {
        let state = self.state.lock().unwrap();
        let local_id = state.local_user_id?;
        state
            .participants
            .iter()
            .find(|p| p.user_id == local_id)
            .cloned()
    }

    fn subscribe(&self, event: RosterEvent, listener: RosterListener) -> ListenerId {
        self.registry.subscribe(event, listener)
    }

    fn unsubscribe(&self, event: RosterEvent, id: ListenerId) -> bool {
        self.registry.unsubscribe(event, id)
    }
}
