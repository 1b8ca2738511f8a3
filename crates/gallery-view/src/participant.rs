//! Participant model and gallery ordering.
//!
//! Default order of the gallery:
//! 1. participants with video on first
//! 2. the local user in the second position

use common::types::UserId;
use serde::{Deserialize, Serialize};

/// Snapshot of one participant as reported by the roster provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Identifier, unique within a roster snapshot.
    pub user_id: UserId,
    /// Whether the participant's camera is on.
    pub video_on: bool,
    /// Display name, passed through to the render driver.
    pub display_name: String,
}

impl Participant {
    /// Create a participant snapshot.
    #[must_use]
    pub fn new(user_id: impl Into<UserId>, video_on: bool, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            video_on,
            display_name: display_name.into(),
        }
    }
}

/// Reorder a roster for display.
///
/// A single-member roster is returned unchanged. Otherwise the local user is
/// removed by identifier, the rest are stable-sorted video-on first, and the
/// local user is inserted at index 1.
#[must_use]
pub fn ordered_roster(roster: &[Participant], local_user: &Participant) -> Vec<Participant> {
    if roster.len() == 1 {
        return roster.to_vec();
    }

    let mut ordered: Vec<Participant> = roster
        .iter()
        .filter(|p| p.user_id != local_user.user_id)
        .cloned()
        .collect();

    // `sort_by_key` is stable, so equal video status keeps roster order.
    ordered.sort_by_key(|p| !p.video_on);

    let self_index = ordered.len().min(1);
    ordered.insert(self_index, local_user.clone());
    ordered
}
