//! Property tests for roster ordering, page selection and grid layout.
//!
//! Every roster is generated with unique identifiers and contains the local
//! user; pagination is derived from the same roster, as the coordinator's
//! caller is expected to do.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use gallery_view::grid::max_viewport_cells;
use gallery_view::participant::ordered_roster;
use gallery_view::{
    compute_grid, select_page, Dimension, GridOptions, Pagination, Participant,
};
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone)]
struct Scenario {
    roster: Vec<Participant>,
    local: Participant,
    pagination: Pagination,
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (
        proptest::collection::vec(any::<bool>(), 1..40),
        any::<Index>(),
        1usize..10,
        any::<Index>(),
    )
        .prop_map(|(cameras, local_pick, page_size, page_pick)| {
            let roster: Vec<Participant> = cameras
                .iter()
                .enumerate()
                .map(|(i, &video_on)| {
                    let id = u32::try_from(i).unwrap() + 100;
                    Participant::new(id, video_on, format!("user-{id}"))
                })
                .collect();
            let local = roster[local_pick.index(roster.len())].clone();
            let total_page = roster.len().div_ceil(page_size);
            let pagination =
                Pagination::for_roster(page_size, roster.len(), page_pick.index(total_page));

            Scenario {
                roster,
                local,
                pagination,
            }
        })
}

// ============================================================================
// Ordering
// ============================================================================

proptest! {
    #[test]
    fn local_user_sits_second(scenario in scenario_strategy()) {
        let ordered = ordered_roster(&scenario.roster, &scenario.local);

        prop_assert_eq!(ordered.len(), scenario.roster.len());
        if ordered.len() >= 2 {
            prop_assert_eq!(ordered[1].user_id, scenario.local.user_id);
        }
    }

    #[test]
    fn camera_on_precedes_camera_off(scenario in scenario_strategy()) {
        let ordered = ordered_roster(&scenario.roster, &scenario.local);
        if ordered.len() < 2 {
            return Ok(());
        }

        let others: Vec<&Participant> = ordered
            .iter()
            .filter(|p| p.user_id != scenario.local.user_id)
            .collect();
        let first_off = others.iter().position(|p| !p.video_on).unwrap_or(others.len());
        prop_assert!(others[first_off..].iter().all(|p| !p.video_on));

        // Ties keep roster order.
        for group in [true, false] {
            let ids: Vec<_> = others
                .iter()
                .filter(|p| p.video_on == group)
                .map(|p| p.user_id)
                .collect();
            let mut sorted = ids.clone();
            sorted.sort();
            prop_assert_eq!(ids, sorted);
        }
    }
}

// ============================================================================
// Page selection
// ============================================================================

proptest! {
    #[test]
    fn page_is_full_unless_roster_fits_one_short_page(scenario in scenario_strategy()) {
        let Scenario { roster, local, pagination } = &scenario;
        let selection = select_page(roster, Some(local), pagination);

        let expected = if pagination.total_page == 1 {
            pagination.total_size.min(pagination.page_size)
        } else {
            pagination.page_size
        };
        prop_assert_eq!(selection.visible_participants.len(), expected);
    }

    #[test]
    fn visible_participants_are_distinct(scenario in scenario_strategy()) {
        let Scenario { roster, local, pagination } = &scenario;
        let selection = select_page(roster, Some(local), pagination);

        let unique: HashSet<_> = selection.visible_participants.iter().map(|p| p.user_id).collect();
        prop_assert_eq!(unique.len(), selection.visible_participants.len());
    }

    #[test]
    fn subscriptions_are_exactly_visible_cameras(scenario in scenario_strategy()) {
        let Scenario { roster, local, pagination } = &scenario;
        let selection = select_page(roster, Some(local), pagination);

        let expected: BTreeSet<_> = selection
            .visible_participants
            .iter()
            .filter(|p| p.video_on)
            .map(|p| p.user_id)
            .collect();
        prop_assert_eq!(&selection.subscriptions, &expected);
    }

    #[test]
    fn padding_only_on_last_page(scenario in scenario_strategy()) {
        let Scenario { roster, local, pagination } = &scenario;
        let selection = select_page(roster, Some(local), pagination);

        if !pagination.is_last_page() || pagination.total_page == 1 {
            prop_assert_eq!(selection.padding_len, 0);
        }
        prop_assert!(selection.padding_len < pagination.page_size);
    }

    #[test]
    fn selection_is_deterministic(scenario in scenario_strategy()) {
        let Scenario { roster, local, pagination } = &scenario;

        prop_assert_eq!(
            select_page(roster, Some(local), pagination),
            select_page(roster, Some(local), pagination)
        );
    }

    #[test]
    fn absent_local_user_selects_nothing(scenario in scenario_strategy()) {
        let selection = select_page(&scenario.roster, None, &scenario.pagination);
        prop_assert!(selection.is_empty());
        prop_assert!(selection.subscriptions.is_empty());
    }
}

// ============================================================================
// Grid layout
// ============================================================================

proptest! {
    #[test]
    fn grid_cells_stay_inside_viewport(
        width in 160.0f64..3840.0,
        height in 90.0f64..2160.0,
        slots in 0usize..30,
    ) {
        let dimension = Dimension::new(width, height).unwrap();
        let cells = compute_grid(&dimension, slots, &GridOptions::default());

        prop_assert_eq!(cells.len(), slots);
        for cell in &cells {
            prop_assert!(cell.x >= 0.0 && cell.y >= 0.0);
            prop_assert!(cell.x + cell.width <= width + 1e-6);
            prop_assert!(cell.y + cell.height <= height + 1e-6);
        }
    }

    #[test]
    fn grid_is_deterministic(
        width in 160.0f64..3840.0,
        height in 90.0f64..2160.0,
        slots in 0usize..30,
    ) {
        let dimension = Dimension::new(width, height).unwrap();
        let options = GridOptions::default();

        prop_assert_eq!(
            compute_grid(&dimension, slots, &options),
            compute_grid(&dimension, slots, &options)
        );
    }

    #[test]
    fn viewport_capacity_is_bounded(
        width in 160.0f64..3840.0,
        height in 90.0f64..2160.0,
        max_page_size in 1usize..30,
    ) {
        let dimension = Dimension::new(width, height).unwrap();
        let cells = max_viewport_cells(&dimension, &GridOptions::default(), max_page_size);

        prop_assert!(cells >= 1);
        prop_assert!(cells <= max_page_size);
    }
}
