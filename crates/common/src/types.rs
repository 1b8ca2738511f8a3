//! Common data types for the gallery crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a participant within a roster snapshot.
///
/// The roster provider assigns these; the gallery only compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl UserId {
    /// Raw numeric value of the identifier
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for UserId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
