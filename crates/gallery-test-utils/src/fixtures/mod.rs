//! Pre-configured test data fixtures for gallery testing.
//!
//! Provides builders and test data for:
//! - Participants with camera on or off
//! - Rosters described as compact `(id, video_on)` lists

use gallery_view::Participant;

/// Test participant builder.
#[derive(Debug, Clone)]
pub struct TestParticipant {
    /// User ID.
    pub user_id: u32,
    /// Camera state.
    pub video_on: bool,
    /// Display name.
    pub name: String,
}

impl TestParticipant {
    /// Create a camera-off participant named after its ID.
    #[must_use]
    pub fn new(user_id: u32) -> Self {
        Self {
            user_id,
            video_on: false,
            name: format!("user-{user_id}"),
        }
    }

    /// Turn the camera on.
    #[must_use]
    pub fn video_on(mut self) -> Self {
        self.video_on = true;
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Build the participant snapshot.
    #[must_use]
    pub fn build(self) -> Participant {
        Participant::new(self.user_id, self.video_on, self.name)
    }
}

/// Build a roster from `(id, video_on)` pairs, preserving order.
#[must_use]
pub fn roster_of(entries: &[(u32, bool)]) -> Vec<Participant> {
    entries
        .iter()
        .map(|&(id, video_on)| Participant::new(id, video_on, format!("user-{id}")))
        .collect()
}

/// Identifiers of `participants`, in order.
#[must_use]
pub fn ids_of(participants: &[Participant]) -> Vec<u32> {
    participants.iter().map(|p| p.user_id.get()).collect()
}
