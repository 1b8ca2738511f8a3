//! Render/subscription driver seam.
//!
//! The driver owns the actual video feeds and the drawing surface. The
//! coordinator hands it a complete [`GalleryFrame`] after every recomputation;
//! the driver starts and stops feeds and paints cells from it.

use crate::grid::CellLayout;
use crate::participant::Participant;
use common::types::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Consumer of gallery output.
pub trait RenderDriver: Send {
    /// Apply a freshly computed frame. Supersedes any earlier frame.
    fn render(&mut self, frame: &GalleryFrame);
}

/// Everything the driver needs after one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryFrame {
    /// Monotonic frame counter, starting at 1.
    pub generation: u64,
    /// One cell per grid slot.
    pub layout: Vec<CellLayout>,
    /// Visible participants, in the same order as `layout`.
    pub visible_participants: Vec<Participant>,
    /// Identifiers that should have a live video feed.
    pub subscriptions: BTreeSet<UserId>,
    /// The viewer's identifier, if known.
    pub local_user_id: Option<UserId>,
    /// Subscription change relative to the previous frame.
    pub delta: SubscriptionDelta,
}

/// Difference between two subscription sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionDelta {
    /// Feeds to start.
    pub added: Vec<UserId>,
    /// Feeds to stop.
    pub removed: Vec<UserId>,
    /// Feeds to keep, possibly in a different cell.
    pub retained: Vec<UserId>,
}

impl SubscriptionDelta {
    /// Compute what changes going from `previous` to `next`.
    #[must_use]
    pub fn between(previous: &BTreeSet<UserId>, next: &BTreeSet<UserId>) -> Self {
        Self {
            added: next.difference(previous).copied().collect(),
            removed: previous.difference(next).copied().collect(),
            retained: next.intersection(previous).copied().collect(),
        }
    }

    /// Whether no feed starts or stops.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
