//! Target margin ratio and its presets.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{format_percent, DomainError, Ratio};

/// Margin presets offered by the calculator.
pub const MARGIN_PRESETS: [Ratio; 5] = [dec!(0.10), dec!(0.15), dec!(0.20), dec!(0.25), dec!(0.30)];

/// Default target margin.
pub const DEFAULT_MARGIN: Ratio = dec!(0.25);

/// Minimum fraction of the resale price that must remain as profit.
///
/// Always in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TargetMargin(Ratio);

impl TargetMargin {
    /// Validate a ratio as a target margin.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MarginOutOfRange`] unless `0 <= ratio < 1`.
    pub fn try_new(ratio: Ratio) -> Result<Self, DomainError> {
        if ratio < Decimal::ZERO || ratio >= Decimal::ONE {
            return Err(DomainError::MarginOutOfRange { margin: ratio });
        }
        Ok(Self(ratio))
    }

    /// The underlying ratio.
    #[must_use]
    pub const fn ratio(self) -> Ratio {
        self.0
    }

    /// Whether this margin is one of the presets.
    #[must_use]
    pub fn is_preset(self) -> bool {
        MARGIN_PRESETS.contains(&self.0)
    }

    /// All presets as validated margins.
    pub fn presets() -> impl Iterator<Item = TargetMargin> {
        MARGIN_PRESETS.into_iter().map(TargetMargin)
    }
}

impl Default for TargetMargin {
    fn default() -> Self {
        Self(DEFAULT_MARGIN)
    }
}

impl TryFrom<Decimal> for TargetMargin {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<TargetMargin> for Decimal {
    fn from(margin: TargetMargin) -> Self {
        margin.0
    }
}

impl fmt::Display for TargetMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_percent(self.0, 0))
    }
}

/// Parses `0.2`, `20%` or `20`. Bare values of 1 or more are percentages.
impl FromStr for TargetMargin {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || DomainError::InvalidMargin {
            value: s.to_string(),
        };

        let (number, is_percent) = match trimmed.strip_suffix('%') {
            Some(rest) => (rest.trim(), true),
            None => (trimmed, false),
        };

        let value: Decimal = number.parse().map_err(|_| invalid())?;
        let ratio = if is_percent || value >= Decimal::ONE {
            value / Decimal::ONE_HUNDRED
        } else {
            value
        };

        Self::try_new(ratio)
    }
}
