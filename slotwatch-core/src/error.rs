//! Error types for slotwatch-core.

use thiserror::Error;

/// Errors that can occur while extracting slots from a calendar page.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Day number '{0}' is not an integer")]
    DayNumber(String),

    #[error("Day {day} does not exist in {year}-{month:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Day anchor has no parent cell")]
    MissingCell,

    #[error("Seat count '{0}' is not an integer")]
    SeatCount(String),

    #[error("Invalid selector '{0}'")]
    Selector(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),
}

impl CoreError {
    /// Structural errors mean the page no longer matches the expected layout.
    /// They abort the current page only; anything else aborts the scan.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CoreError::DayNumber(_) | CoreError::InvalidDate { .. } | CoreError::MissingCell
        )
    }
}

/// Result type alias for slotwatch-core operations.
pub type CoreResult<T> = Result<T, CoreError>;
