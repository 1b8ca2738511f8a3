//! Observability module for the gallery.
//!
//! Metric labels are bounded to prevent cardinality explosion:
//! - `derivation`: 2 values (page, layout)
//! - `event`: 3 values (`user_added`, `user_updated`, `user_removed`)
//!
//! No participant identifiers or display names are ever used as labels.
//!
//! # Metrics
//!
//! | Metric | Type | Labels | Purpose |
//! |--------|------|--------|---------|
//! | `gallery_recompute_total` | Counter | `derivation` | Recomputations per derivation |
//! | `gallery_recompute_duration_seconds` | Histogram | none | Time spent in one signal's recomputation |
//! | `gallery_visible_participants` | Gauge | none | Participants on the current page |
//! | `gallery_video_subscriptions` | Gauge | none | Live video feeds requested |
//! | `gallery_roster_signals_total` | Counter | `event` | Roster notifications received |
//! | `gallery_frames_rendered_total` | Counter | none | Frames forwarded to the render driver |

pub mod metrics;

// Re-exports for convenience
pub use self::metrics::{
    record_frame_rendered, record_recompute, record_recompute_duration, record_roster_signal,
    set_video_subscriptions, set_visible_participants,
};
