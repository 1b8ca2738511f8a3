//! Gallery error types.
//!
//! The derivations themselves are total functions and never fail. Errors only
//! come from validating constructors, configuration loading and the signal
//! mailbox.

use crate::config::ConfigError;
use thiserror::Error;

/// Gallery error type.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Viewport dimension is not a finite, positive size.
    #[error("Invalid dimension: {width}x{height}")]
    InvalidDimension { width: f64, height: f64 },

    /// Pagination parameters violate `0 <= page < total_page` or have a zero page size.
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// The coordinator owning the signal mailbox has been dropped.
    #[error("Gallery mailbox closed")]
    MailboxClosed,
}

impl GalleryError {
    /// Whether the error was caused by bad input from the caller (as opposed to
    /// the gallery having shut down).
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        match self {
            GalleryError::Config(_)
            | GalleryError::InvalidDimension { .. }
            | GalleryError::InvalidPagination(_) => true,
            GalleryError::MailboxClosed => false,
        }
    }
}
