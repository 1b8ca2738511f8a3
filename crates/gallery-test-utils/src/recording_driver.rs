//! Render driver that records every frame it receives.

use gallery_view::{GalleryFrame, RenderDriver};
use std::sync::{Arc, Mutex};

/// Shared, inspectable log of rendered frames.
#[derive(Debug, Clone, Default)]
pub struct FrameLog {
    frames: Arc<Mutex<Vec<GalleryFrame>>>,
}

impl FrameLog {
    /// Number of frames rendered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recent frame.
    ///
    /// # Panics
    ///
    /// Panics if nothing has been rendered.
    #[must_use]
    pub fn last(&self) -> GalleryFrame {
        self.frames
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no frame rendered yet")
    }

    /// Every frame, oldest first.
    #[must_use]
    pub fn all(&self) -> Vec<GalleryFrame> {
        self.frames.lock().unwrap().clone()
    }
}

/// Driver that appends each frame to a [`FrameLog`].
#[derive(Debug, Default)]
pub struct RecordingDriver {
    log: FrameLog,
}

impl RecordingDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the frames this driver records.
    #[must_use]
    pub fn frames(&self) -> FrameLog {
        self.log.clone()
    }
}

impl RenderDriver for RecordingDriver {
    fn render(&mut self, frame: &GalleryFrame) {
        self.log.frames.lock().unwrap().push(frame.clone());
    }
}
