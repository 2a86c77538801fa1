//! Error taxonomy for the tracker core.
//!
//! Validation errors (`InvalidOutcome`, `InvalidWindow`) are raised before
//! any state mutation. `EmptyHistory` signals "nothing to undo" and is not a
//! crash condition. `Persistence` never unwinds in-memory history — the
//! running session stays authoritative and the failure is surfaced for
//! logging only.

use thiserror::Error;

use crate::outcome::TableVariant;

#[derive(Debug, Error)]
pub enum RouletteError {
    #[error("outcome {value} is outside the valid range for a {variant} table")]
    InvalidOutcome { value: u8, variant: TableVariant },

    #[error("window size must be non-negative, got {0}")]
    InvalidWindow(i64),

    #[error("history is empty, nothing to remove")]
    EmptyHistory,

    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl RouletteError {
    /// Wrap an IO error from a storage adapter.
    pub fn persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RouletteError>;
