//! Grid layout calculator.
//!
//! Tiles the viewport with `slot_count` equally sized cells of a fixed aspect
//! ratio, choosing the column count that gives the largest cells.
//!
//! # Layout Rules
//!
//! - Every candidate column count `1..=slot_count` is tried; the one with the
//!   strictly largest fitted cell width wins (ties keep fewer columns)
//! - Cell sizes are floored to whole pixels
//! - Rows fill left to right, top to bottom; each row is centred horizontally
//!   and the block of rows is centred vertically
//! - The origin is the top-left corner of the viewport
//!
//! # Examples (16:9 viewport)
//!
//! ```text
//! 3 slots:            4 slots:
//! +------+------+     +------+------+
//! |  0   |  1   |     |  0   |  1   |
//! +--+---+---+--+     +------+------+
//!    |   2   |        |  2   |  3   |
//!    +-------+        +------+------+
//! ```

use crate::config::{DEFAULT_CELL_ASPECT_RATIO, DEFAULT_CELL_GAP, DEFAULT_MIN_CELL_WIDTH};
use crate::errors::GalleryError;
use serde::{Deserialize, Serialize};

/// Size of the rendering viewport in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

impl Dimension {
    /// Create a validated viewport size.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::InvalidDimension` unless both extents are finite
    /// and positive.
    pub fn new(width: f64, height: f64) -> Result<Self, GalleryError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(width) && valid(height)) {
            return Err(GalleryError::InvalidDimension { width, height });
        }
        Ok(Self { width, height })
    }

    /// Bitwise equality of both extents, so a NaN extent equals itself.
    #[must_use]
    pub fn same_extent(&self, other: &Dimension) -> bool {
        self.width.to_bits() == other.width.to_bits()
            && self.height.to_bits() == other.height.to_bits()
    }
}

/// Video resolution tier suited to a cell of a given height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoQuality {
    P90,
    P180,
    P360,
    P720,
}

impl VideoQuality {
    /// Lowest tier that still fills a cell `height` pixels tall.
    #[must_use]
    pub fn for_cell_height(height: f64) -> Self {
        if height <= 90.0 {
            VideoQuality::P90
        } else if height <= 180.0 {
            VideoQuality::P180
        } else if height <= 360.0 {
            VideoQuality::P360
        } else {
            VideoQuality::P720
        }
    }
}

/// One grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Subscription resolution for a feed rendered in this cell.
    pub quality: VideoQuality,
}

/// Geometry options for the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    /// Cell width / height.
    pub aspect_ratio: f64,
    /// Gap between neighbouring cells, in pixels.
    pub gap: f64,
    /// Smallest cell width worth rendering, used by [`max_viewport_cells`].
    pub min_cell_width: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_CELL_ASPECT_RATIO,
            gap: DEFAULT_CELL_GAP,
            min_cell_width: DEFAULT_MIN_CELL_WIDTH,
        }
    }
}

impl GridOptions {
    fn sanitized_aspect_ratio(&self) -> f64 {
        if self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0 {
            self.aspect_ratio
        } else {
            DEFAULT_CELL_ASPECT_RATIO
        }
    }

    fn sanitized_gap(&self) -> f64 {
        if self.gap.is_finite() {
            self.gap.max(0.0)
        } else {
            0.0
        }
    }
}

/// Compute `slot_count` cells tiling `dimension`, in display order.
///
/// Deterministic: the same inputs always yield the same cells. A zero
/// `slot_count` yields no cells; a degenerate viewport yields zero-sized cells.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn compute_grid(
    dimension: &Dimension,
    slot_count: usize,
    options: &GridOptions,
) -> Vec<CellLayout> {
    if slot_count == 0 {
        return Vec::new();
    }

    let width = non_negative(dimension.width);
    let height = non_negative(dimension.height);
    let aspect_ratio = options.sanitized_aspect_ratio();
    let gap = options.sanitized_gap();

    let (cols, rows, fitted_width) = best_shape(width, height, slot_count, aspect_ratio, gap);
    let cell_width = fitted_width.floor();
    let cell_height = (cell_width / aspect_ratio).floor();
    let quality = VideoQuality::for_cell_height(cell_height);

    let grid_height = rows as f64 * cell_height + (rows - 1) as f64 * gap;
    let top = ((height - grid_height) / 2.0).max(0.0).floor();

    let mut cells = Vec::with_capacity(slot_count);
    for row in 0..rows {
        let in_row = (slot_count - row * cols).min(cols);
        let row_width = in_row as f64 * cell_width + (in_row - 1) as f64 * gap;
        let left = ((width - row_width) / 2.0).max(0.0).floor();
        let y = (row as f64).mul_add(cell_height + gap, top);

        for col in 0..in_row {
            cells.push(CellLayout {
                x: (col as f64).mul_add(cell_width + gap, left),
                y,
                width: cell_width,
                height: cell_height,
                quality,
            });
        }
    }

    cells
}

/// How many cells of at least `options.min_cell_width` fit in the viewport,
/// clamped to `1..=max_page_size`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn max_viewport_cells(dimension: &Dimension, options: &GridOptions, max_page_size: usize) -> usize {
    let gap = options.sanitized_gap();
    let cell_width = if options.min_cell_width.is_finite() && options.min_cell_width > 0.0 {
        options.min_cell_width
    } else {
        DEFAULT_MIN_CELL_WIDTH
    };
    let cell_height = cell_width / options.sanitized_aspect_ratio();

    let cols = ((non_negative(dimension.width) + gap) / (cell_width + gap)).floor() as usize;
    let rows = ((non_negative(dimension.height) + gap) / (cell_height + gap)).floor() as usize;

    cols.saturating_mul(rows).clamp(1, max_page_size.max(1))
}

/// Pick `(cols, rows, fitted_cell_width)` maximising the cell width.
#[allow(clippy::cast_precision_loss)]
fn best_shape(
    width: f64,
    height: f64,
    slot_count: usize,
    aspect_ratio: f64,
    gap: f64,
) -> (usize, usize, f64) {
    let mut best = (1, slot_count, f64::NEG_INFINITY);

    for cols in 1..=slot_count {
        let rows = slot_count.div_ceil(cols);
        let box_width = non_negative((width - gap * (cols - 1) as f64) / cols as f64);
        let box_height = non_negative((height - gap * (rows - 1) as f64) / rows as f64);
        let fitted = box_width.min(box_height * aspect_ratio);

        if fitted > best.2 {
            best = (cols, rows, fitted);
        }
    }

    best
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
