//! Common utilities and types shared across the gallery crates.

#![warn(clippy::pedantic)]

/// Module for common data types
pub mod types;
