//! Banded fee schedule (IAA).
//!
//! A few closed hammer-price intervals, each mapped to one flat fee. Prices
//! outside every band (above the last one, or negative) are charged a
//! conservative fallback fee.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::FeeSchedule;
use crate::domain::{DomainError, FeeResult, Money, MAX_AMOUNT};

const TABLE_NAME: &str = "iaa";

/// Closed interval `[min, max]` of hammer price with a flat fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBand {
    pub min: Money,
    pub max: Money,
    pub fee: Money,
    pub label: String,
}

impl FeeBand {
    #[must_use]
    pub fn new(min: Money, max: Money, fee: Money, label: impl Into<String>) -> Self {
        Self {
            min,
            max,
            fee,
            label: label.into(),
        }
    }

    /// Whether `hammer` lies inside the band, bounds included.
    #[must_use]
    pub fn contains(&self, hammer: Money) -> bool {
        hammer >= self.min && hammer <= self.max
    }

    #[must_use]
    pub fn fee_result(&self) -> FeeResult {
        FeeResult::flat(self.fee, self.label.clone())
    }
}

/// Fee charged when no band contains the hammer price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackFee {
    pub fee: Money,
    pub label: String,
}

/// Ordered, non-overlapping flat-fee bands plus a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandedSchedule {
    bands: Vec<FeeBand>,
    fallback: FallbackFee,
}

impl BandedSchedule {
    /// Build a schedule, checking band ordering.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFeeTable`] if there are no bands, a band
    /// is inverted, bands are unsorted or overlap, or any fee is negative.
    pub fn try_new(bands: Vec<FeeBand>, fallback: FallbackFee) -> Result<Self, DomainError> {
        let schedule = Self { bands, fallback };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check the band rules on an already-built (e.g. deserialized) schedule.
    ///
    /// # Errors
    ///
    /// See [`BandedSchedule::try_new`].
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: String| DomainError::InvalidFeeTable {
            table: TABLE_NAME,
            reason,
        };

        if self.bands.is_empty() {
            return Err(invalid("at least one band is required".into()));
        }

        for band in &self.bands {
            if band.min > band.max {
                return Err(invalid(format!(
                    "band [{}, {}] has min above max",
                    band.min, band.max
                )));
            }
            if band.fee < Decimal::ZERO {
                return Err(invalid(format!(
                    "band [{}, {}] has a negative fee",
                    band.min, band.max
                )));
            }
            if band.fee > MAX_AMOUNT {
                return Err(invalid(format!(
                    "band [{}, {}] fee exceeds {MAX_AMOUNT}",
                    band.min, band.max
                )));
            }
        }

        for pair in self.bands.windows(2) {
            if pair[1].min <= pair[0].max {
                return Err(invalid(format!(
                    "bands must be sorted and non-overlapping ([{}, {}] then [{}, {}])",
                    pair[0].min, pair[0].max, pair[1].min, pair[1].max
                )));
            }
        }

        if self.fallback.fee < Decimal::ZERO {
            return Err(invalid("fallback fee is negative".into()));
        }
        if self.fallback.fee > MAX_AMOUNT {
            return Err(invalid(format!("fallback fee exceeds {MAX_AMOUNT}")));
        }

        Ok(())
    }

    #[must_use]
    pub fn bands(&self) -> &[FeeBand] {
        &self.bands
    }

    #[must_use]
    pub const fn fallback(&self) -> &FallbackFee {
        &self.fallback
    }

    #[must_use]
    pub fn fallback_result(&self) -> FeeResult {
        FeeResult::flat(self.fallback.fee, self.fallback.label.clone())
    }

    /// The band containing `hammer`, if any.
    #[must_use]
    pub fn band_for(&self, hammer: Money) -> Option<&FeeBand> {
        self.bands.iter().find(|band| band.contains(hammer))
    }
}

impl FeeSchedule for BandedSchedule {
    fn name(&self) -> &'static str {
        TABLE_NAME
    }

    fn evaluate(&self, hammer: Money) -> FeeResult {
        self.band_for(hammer)
            .map_or_else(|| self.fallback_result(), FeeBand::fee_result)
    }
}

impl Default for BandedSchedule {
    fn default() -> Self {
        Self {
            bands: vec![
                FeeBand::new(dec!(0), dec!(1999.99), dec!(485), "IAA Fees: $485 (< $2k hammer)"),
                FeeBand::new(
                    dec!(2000),
                    dec!(4999.99),
                    dec!(840),
                    "IAA Fees: $840 ($2k–$5k hammer)",
                ),
                FeeBand::new(
                    dec!(5000),
                    dec!(6999.99),
                    dec!(905),
                    "IAA Fees: $905 ($5k–$7k hammer)",
                ),
            ],
            fallback: FallbackFee {
                fee: dec!(1000),
                label: "IAA Fees: ~$1,000 (>= $7k hammer, conservative)".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_bounds_are_inclusive() {
        let schedule = BandedSchedule::default();
        assert_eq!(schedule.evaluate(dec!(0)).total_fees, dec!(485));
        assert_eq!(schedule.evaluate(dec!(1999.99)).total_fees, dec!(485));
        assert_eq!(schedule.evaluate(dec!(2000)).total_fees, dec!(840));
        assert_eq!(schedule.evaluate(dec!(6999.99)).total_fees, dec!(905));
    }

    #[test]
    fn above_last_band_uses_conservative_fallback() {
        let result = BandedSchedule::default().evaluate(dec!(7000));
        assert_eq!(result.total_fees, dec!(1000));
        assert!(result.label.contains("conservative"));
    }

    #[test]
    fn negative_hammer_uses_fallback() {
        assert_eq!(
            BandedSchedule::default().evaluate(dec!(-1)).total_fees,
            dec!(1000)
        );
    }

    #[test]
    fn gap_between_bands_uses_fallback() {
        assert_eq!(
            BandedSchedule::default().evaluate(dec!(1999.995)).total_fees,
            dec!(1000)
        );
    }

    #[test]
    fn default_table_is_valid() {
        assert!(BandedSchedule::default().validate().is_ok());
    }

    #[test]
    fn rejects_overlapping_bands() {
        let err = BandedSchedule::try_new(
            vec![
                FeeBand::new(dec!(0), dec!(100), dec!(1), "a"),
                FeeBand::new(dec!(100), dec!(200), dec!(2), "b"),
            ],
            FallbackFee {
                fee: dec!(3),
                label: "c".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidFeeTable { table: "iaa", .. }));
    }

    #[test]
    fn rejects_oversized_fallback_fee() {
        let result = BandedSchedule::try_new(
            vec![FeeBand::new(dec!(0), dec!(5), dec!(1), "a")],
            FallbackFee {
                fee: Decimal::MAX,
                label: "c".into(),
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_inverted_band() {
        let result = BandedSchedule::try_new(
            vec![FeeBand::new(dec!(10), dec!(5), dec!(1), "a")],
            FallbackFee {
                fee: dec!(3),
                label: "c".into(),
            },
        );
        assert!(result.is_err());
    }
}
