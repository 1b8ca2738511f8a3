//! Participant page selection.
//!
//! Turns a roster snapshot, the local user and the current [`Pagination`]
//! into the ordered list of participants shown on the page and the set of
//! identifiers that should receive live video.
//!
//! # Padding
//!
//! The last page is usually under-full. Instead of leaving blank cells, the
//! slots in front of the page are filled with the participants immediately
//! preceding the last page in display order:
//!
//! ```text
//! ordered roster:  [P0 P1 | P2 P3 | P4 __]      page_size = 2, page = 2
//! last page slice: [P4]                         vacant = 1
//! padding window:  ordered[4 - 1 .. 4] = [P3]
//! visible:         [P3 P4]
//! ```
//!
//! With a single page the window start would be negative; it is clamped to
//! zero, which leaves the window empty.

use crate::pagination::Pagination;
use crate::participant::{ordered_roster, Participant};
use common::types::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of selecting one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSelection {
    /// Participants to display, padding first then the page itself.
    pub visible_participants: Vec<Participant>,
    /// Visible participants with video on.
    pub subscriptions: BTreeSet<UserId>,
    /// How many leading entries of `visible_participants` are padding.
    pub padding_len: usize,
}

impl PageSelection {
    /// Whether nothing is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible_participants.is_empty()
    }

    /// Identifiers of the visible participants, in display order.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<UserId> {
        self.visible_participants.iter().map(|p| p.user_id).collect()
    }
}

/// Select the participants visible on `pagination.page`.
///
/// Returns an empty selection when the local user is not known yet or the
/// roster is empty.
///
/// The caller must derive `pagination` from the same roster snapshot;
/// inconsistent parameters produce an unspecified (but panic-free) selection.
#[must_use]
pub fn select_page(
    roster: &[Participant],
    local_user: Option<&Participant>,
    pagination: &Pagination,
) -> PageSelection {
    let Some(local_user) = local_user else {
        return PageSelection::default();
    };
    if roster.is_empty() {
        return PageSelection::default();
    }

    if roster.len() == 1 {
        return selection_from(roster.to_vec(), 0);
    }

    let ordered = ordered_roster(roster, local_user);
    let page_size = pagination.page_size.max(1);

    let page_slice: Vec<Participant> = ordered
        .iter()
        .enumerate()
        .filter(|(index, _)| index / page_size == pagination.page)
        .map(|(_, p)| p.clone())
        .collect();

    if page_slice.len() >= page_size {
        return selection_from(page_slice, 0);
    }

    let vacant = page_size - page_slice.len();
    let window_end = page_size
        .saturating_mul(pagination.total_page.saturating_sub(1))
        .min(ordered.len());
    let window_start = window_end.saturating_sub(vacant);
    let padding: Vec<Participant> = ordered
        .iter()
        .skip(window_start)
        .take(window_end - window_start)
        .cloned()
        .collect();

    let padding_len = padding.len();
    let mut visible = padding;
    visible.extend(page_slice);
    selection_from(visible, padding_len)
}

fn selection_from(visible_participants: Vec<Participant>, padding_len: usize) -> PageSelection {
    let subscriptions = visible_participants
        .iter()
        .filter(|p| p.video_on)
        .map(|p| p.user_id)
        .collect();

    PageSelection {
        visible_participants,
        subscriptions,
        padding_len,
    }
}
