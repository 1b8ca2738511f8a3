//! Metrics definitions for the gallery.
//!
//! All metrics follow Prometheus naming conventions:
//! - `gallery_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! The crate only records through the `metrics` facade. Without an installed
//! recorder every call is a no-op.

use metrics::{counter, gauge, histogram};
use std::time::Duration;

// ============================================================================
// Recomputation Metrics
// ============================================================================

/// Record one recomputation of a derivation.
///
/// Metric: `gallery_recompute_total`
/// Labels: `derivation` (page, layout)
pub fn record_recompute(derivation: &'static str) {
    counter!("gallery_recompute_total", "derivation" => derivation).increment(1);
}

/// Record the time spent handling one signal.
///
/// Metric: `gallery_recompute_duration_seconds`
/// Labels: none
pub fn record_recompute_duration(duration: Duration) {
    histogram!("gallery_recompute_duration_seconds").record(duration.as_secs_f64());
}

// ============================================================================
// Output Metrics (Gauges)
// ============================================================================

/// Set the number of participants on the current page.
///
/// Metric: `gallery_visible_participants`
pub fn set_visible_participants(count: usize) {
    // usize to f64 conversion is safe for realistic page sizes
    #[allow(clippy::cast_precision_loss)]
    gauge!("gallery_visible_participants").set(count as f64);
}

/// Set the number of requested video feeds.
///
/// Metric: `gallery_video_subscriptions`
pub fn set_video_subscriptions(count: usize) {
    #[allow(clippy::cast_precision_loss)]
    gauge!("gallery_video_subscriptions").set(count as f64);
}

// ============================================================================
// Signal Metrics (Counters)
// ============================================================================

/// Record a roster notification.
///
/// Metric: `gallery_roster_signals_total`
/// Labels: `event` (`user_added`, `user_updated`, `user_removed`)
pub fn record_roster_signal(event: &'static str) {
    counter!("gallery_roster_signals_total", "event" => event).increment(1);
}

/// Record a frame forwarded to the render driver.
///
/// Metric: `gallery_frames_rendered_total`
pub fn record_frame_rendered() {
    counter!("gallery_frames_rendered_total").increment(1);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};
    use metrics_util::MetricKind;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_recompute("page");
        record_recompute("layout");
        record_recompute_duration(Duration::from_micros(40));
        set_visible_participants(9);
        set_video_subscriptions(4);
        record_roster_signal("user_added");
        record_frame_rendered();
    }

    #[test]
    fn test_metrics_are_captured_by_recorder() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            record_recompute("page");
            record_recompute("page");
            record_recompute("layout");
            record_recompute_duration(Duration::from_micros(120));
            set_visible_participants(4);
            set_video_subscriptions(2);
            record_roster_signal("user_updated");
            record_frame_rendered();
        });

        let metrics = snapshotter.snapshot().into_vec();

        let page_count = metrics.iter().find_map(|(key, _, _, value)| {
            let is_page = key.kind() == MetricKind::Counter
                && key.key().name() == "gallery_recompute_total"
                && key
                    .key()
                    .labels()
                    .any(|l| l.key() == "derivation" && l.value() == "page");
            match (is_page, value) {
                (true, DebugValue::Counter(n)) => Some(*n),
                _ => None,
            }
        });
        assert_eq!(page_count, Some(2));

        let visible = metrics.iter().find_map(|(key, _, _, value)| {
            match (key.key().name(), value) {
                ("gallery_visible_participants", DebugValue::Gauge(v)) => Some(v.into_inner()),
                _ => None,
            }
        });
        assert_eq!(visible, Some(4.0));

        let names: Vec<&str> = metrics.iter().map(|(key, _, _, _)| key.key().name()).collect();
        for expected in [
            "gallery_recompute_total",
            "gallery_recompute_duration_seconds",
            "gallery_visible_participants",
            "gallery_video_subscriptions",
            "gallery_roster_signals_total",
            "gallery_frames_rendered_total",
        ] {
            assert!(names.contains(&expected), "missing metric {expected}");
        }
    }
}
