//! # Gallery Test Utilities
//!
//! Shared test utilities for the gallery view core.
//!
//! This crate provides mock implementations and test fixtures for
//! exercising the coordinator without a real conferencing client.
//!
//! ## Modules
//!
//! - `mock_roster` - In-memory roster provider with controllable notifications
//! - `recording_driver` - Render driver that records every frame
//! - `fixtures` - Participant builders and roster helpers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gallery_test_utils::*;
//!
//! #[test]
//! fn test_example() {
//!     let roster = MockRoster::new()
//!         .with_participant(TestParticipant::new(2).video_on().build())
//!         .with_local_user(TestParticipant::new(1).named("me").build());
//!
//!     let driver = RecordingDriver::new();
//!     let frames = driver.frames();
//!
//!     // Build a GalleryCoordinator with roster.clone() and Box::new(driver)...
//!
//!     roster.add_participant(TestParticipant::new(3).build());
//!     // coordinator.process_pending();
//!     assert_eq!(frames.len(), 2);
//! }
//! ```

pub mod fixtures;
pub mod mock_roster;
pub mod recording_driver;

// Re-export commonly used items
pub use fixtures::*;
pub use mock_roster::*;
pub use recording_driver::*;
