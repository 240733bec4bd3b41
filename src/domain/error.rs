//! Domain validation errors for core domain types.
//!
//! These errors are returned when parsing user-facing selectors and ratios,
//! and when a replaceable fee table violates its ordering rules. The fee
//! resolution and solver operations themselves are total and never fail.
//!
//! # Examples
//!
//! ```
//! use maxbid::domain::{Auction, DomainError};
//!
//! let result = "manheim".parse::<Auction>();
//! assert!(matches!(result, Err(DomainError::UnknownAuction { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The auction selector is not one of the supported auction houses.
    #[error("unknown auction '{value}' (expected one of: iaa, copart)")]
    UnknownAuction {
        /// The selector that was provided.
        value: String,
    },

    /// Target margin must lie in `[0, 1)`.
    #[error("target margin must be in [0, 1), got {margin}")]
    MarginOutOfRange {
        /// The rejected margin ratio.
        margin: rust_decimal::Decimal,
    },

    /// A margin could not be read as a ratio or percentage.
    #[error("invalid margin '{value}'")]
    InvalidMargin {
        /// The raw text that was provided.
        value: String,
    },

    /// A fee table failed structural validation.
    #[error("invalid fee table '{table}': {reason}")]
    InvalidFeeTable {
        /// Name of the offending table.
        table: &'static str,
        /// What rule was broken.
        reason: String,
    },
}
