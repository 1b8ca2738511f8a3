//! Gallery View Library
//!
//! This library computes everything a video-conferencing gallery needs to
//! paint one page of participants:
//!
//! - Which participants are visible on the current page, in display order
//! - Where each of them renders inside the viewport (grid cell geometry)
//! - Which participants should have a live video feed subscribed
//!
//! # Architecture
//!
//! ```text
//! RosterProvider ──(RosterEvent)──┐
//! viewport Dimension ─────────────┼──> GalleryCoordinator ──(GalleryFrame)──> RenderDriver
//! Pagination ─────────────────────┘        │
//!                                          ├── selector::select_page  (visible + subscriptions)
//!                                          └── grid::compute_grid     (cell layout)
//! ```
//!
//! Data flows one way. The selector and the grid calculator are pure
//! functions; the coordinator owns the only mutable state (the cached roster
//! snapshot and the last derived outputs) and recomputes from scratch on every
//! signal.
//!
//! # Key Design Decisions
//!
//! - **Video first, self second**: camera-on participants lead the ordering and
//!   the local user always sits at position 1
//! - **Full last page**: an under-full last page is padded at the front with
//!   participants from the previous page
//! - **Mailbox signals**: roster listeners only enqueue a signal; the
//!   coordinator handles one signal to completion before the next
//! - **Exact unsubscribe**: listeners are removed by the `ListenerId` they were
//!   registered under
//!
//! # Modules
//!
//! - [`participant`] - Participant model and roster ordering
//! - [`pagination`] - Page parameters and effective page size
//! - [`selector`] - Page selection with padding and subscription set
//! - [`grid`] - Grid layout calculator
//! - [`roster`] - Roster provider seam and listener registry
//! - [`driver`] - Render/subscription driver seam
//! - [`coordinator`] - Recomputation orchestration
//! - [`config`] - Configuration from environment
//! - [`errors`] - Error types
//! - [`observability`] - Metrics

#![warn(clippy::pedantic)]

pub mod config;
pub mod coordinator;
pub mod driver;
pub mod errors;
pub mod grid;
pub mod observability;
pub mod pagination;
pub mod participant;
pub mod roster;
pub mod selector;

pub use coordinator::{GalleryCoordinator, GallerySignal, GallerySignalSender, GalleryView};
pub use driver::{GalleryFrame, RenderDriver, SubscriptionDelta};
pub use errors::GalleryError;
pub use grid::{compute_grid, CellLayout, Dimension, GridOptions, VideoQuality};
pub use pagination::Pagination;
pub use participant::Participant;
pub use roster::{ListenerId, ListenerRegistry, RosterEvent, RosterListener, RosterProvider};
pub use selector::{select_page, PageSelection};
