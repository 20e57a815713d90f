//! Error type shared by every fallible geometry operation.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions:
//! - `Ok(value)` = success
//! - `Err(error)` = failure
//!
//! `thiserror` derives `Display` and `std::error::Error` from the
//! `#[error(...)]` attributes so we don't hand-write the boilerplate.
//!
//! Queries that legitimately find nothing (tolerance searches) return
//! `Ok(None)` instead of an error.

use thiserror::Error;

use crate::units::Units;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Index past the current vertex count.
    #[error("index {index} out of range for polygon with {len} points")]
    OutOfRange { index: usize, len: usize },

    /// A query had no qualifying element (e.g. every point excluded).
    #[error("not found: {0}")]
    NotFound(String),

    /// Structurally disallowed mutation.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// The unit context cannot express the requested conversion.
    #[error("cannot convert {from} to {to}: {reason}")]
    ConversionError {
        from: Units,
        to: Units,
        reason: String,
    },
}

impl GeometryError {
    /// Short machine-readable name, used by the CLI's JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            GeometryError::OutOfRange { .. } => "out_of_range",
            GeometryError::NotFound(_) => "not_found",
            GeometryError::InvalidOperation(_) => "invalid_operation",
            GeometryError::ConversionError { .. } => "conversion_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, GeometryError>;
