//! Gallery configuration.
//!
//! Configuration is loaded from environment variables. Values that fail to
//! parse fall back to the defaults; values that parse but are out of range are
//! rejected.

use crate::grid::{max_viewport_cells, Dimension, GridOptions};
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default cell aspect ratio (16:9 video).
pub const DEFAULT_CELL_ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Default gap between grid cells, in pixels.
pub const DEFAULT_CELL_GAP: f64 = 4.0;

/// Default minimum usable cell width, in pixels.
pub const DEFAULT_MIN_CELL_WIDTH: f64 = 256.0;

/// Default upper bound on cells per page (5x5 grid).
pub const DEFAULT_MAX_PAGE_SIZE: usize = 25;

/// Gallery configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    /// Width / height ratio of every grid cell (default: 16/9).
    pub cell_aspect_ratio: f64,

    /// Gap between adjacent cells in pixels (default: 4).
    pub cell_gap: f64,

    /// Smallest cell width worth rendering video into (default: 256).
    pub min_cell_width: f64,

    /// Maximum number of cells on one page (default: 25).
    pub max_page_size: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            cell_aspect_ratio: DEFAULT_CELL_ASPECT_RATIO,
            cell_gap: DEFAULT_CELL_GAP,
            min_cell_width: DEFAULT_MIN_CELL_WIDTH,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl GalleryConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable parses but is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable parses but is out of range.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let cell_aspect_ratio = vars
            .get("GALLERY_CELL_ASPECT_RATIO")
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(DEFAULT_CELL_ASPECT_RATIO);

        let cell_gap = vars
            .get("GALLERY_CELL_GAP")
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(DEFAULT_CELL_GAP);

        let min_cell_width = vars
            .get("GALLERY_MIN_CELL_WIDTH")
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(DEFAULT_MIN_CELL_WIDTH);

        let max_page_size = vars
            .get("GALLERY_MAX_PAGE_SIZE")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_PAGE_SIZE);

        if !(cell_aspect_ratio.is_finite() && cell_aspect_ratio > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "GALLERY_CELL_ASPECT_RATIO must be positive, got {cell_aspect_ratio}"
            )));
        }

        if !(cell_gap.is_finite() && cell_gap >= 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "GALLERY_CELL_GAP must be non-negative, got {cell_gap}"
            )));
        }

        if !(min_cell_width.is_finite() && min_cell_width > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "GALLERY_MIN_CELL_WIDTH must be positive, got {min_cell_width}"
            )));
        }

        if max_page_size == 0 {
            return Err(ConfigError::InvalidValue(
                "GALLERY_MAX_PAGE_SIZE must be at least 1".to_string(),
            ));
        }

        Ok(GalleryConfig {
            cell_aspect_ratio,
            cell_gap,
            min_cell_width,
            max_page_size,
        })
    }

    /// Grid geometry options derived from this configuration.
    #[must_use]
    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            aspect_ratio: self.cell_aspect_ratio,
            gap: self.cell_gap,
            min_cell_width: self.min_cell_width,
        }
    }

    /// Page size for `dimension`: as many cells of at least
    /// `min_cell_width` as fit, capped at `max_page_size`.
    #[must_use]
    pub fn page_size_for(&self, dimension: &Dimension) -> usize {
        max_viewport_cells(dimension, &self.grid_options(), self.max_page_size)
    }
}
