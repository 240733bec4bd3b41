//! Generic step-function fee table.
//!
//! A table is an ascending list of thresholds, each owning the half-open
//! interval that ends at it. A hammer price takes the fee of the first
//! threshold it is strictly below, so a price exactly on a threshold falls
//! into the next step. Prices at or above the last threshold use the tail.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{bound_amount, DomainError, Money, MAX_AMOUNT};

/// One step of a table: prices below `below` (and at or above the previous
/// threshold) pay `fee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub below: Money,
    pub fee: Money,
}

impl Step {
    #[must_use]
    pub const fn new(below: Money, fee: Money) -> Self {
        Self { below, fee }
    }
}

/// Fee charged at or above the last threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Tail {
    /// A flat fee.
    Flat { fee: Money },
    /// A fraction of the hammer price.
    Rate { rate: Decimal },
}

impl Tail {
    /// Fee at `hammer`. A rate applies to the hammer limited to
    /// [`MAX_AMOUNT`].
    #[must_use]
    pub fn apply(self, hammer: Money) -> Money {
        match self {
            Self::Flat { fee } => fee,
            Self::Rate { rate } => bound_amount(hammer) * rate,
        }
    }
}

/// Ordered step table with an unbounded tail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTable {
    steps: Vec<Step>,
    tail: Tail,
}

impl StepTable {
    /// Build a table, checking the ordering rules.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFeeTable`] if the table is empty, its
    /// thresholds are not strictly ascending, or any fee is negative.
    pub fn try_new(name: &'static str, steps: Vec<Step>, tail: Tail) -> Result<Self, DomainError> {
        let table = Self { steps, tail };
        table.validate(name)?;
        Ok(table)
    }

    /// Build a built-in table from whole-dollar `(below, fee)` pairs.
    pub(crate) fn from_whole_dollars<const N: usize>(steps: [(i64, i64); N], tail: Tail) -> Self {
        let steps = steps
            .into_iter()
            .map(|(below, fee)| Step::new(Money::from(below), Money::from(fee)))
            .collect();
        Self { steps, tail }
    }

    /// Check the ordering rules on an already-built (e.g. deserialized) table.
    ///
    /// # Errors
    ///
    /// See [`StepTable::try_new`].
    pub fn validate(&self, name: &'static str) -> Result<(), DomainError> {
        let invalid = |reason: String| DomainError::InvalidFeeTable { table: name, reason };

        if self.steps.is_empty() {
            return Err(invalid("at least one step is required".into()));
        }

        for pair in self.steps.windows(2) {
            if pair[1].below <= pair[0].below {
                return Err(invalid(format!(
                    "thresholds must be strictly ascending ({} then {})",
                    pair[0].below, pair[1].below
                )));
            }
        }

        if let Some(step) = self.steps.iter().find(|s| s.fee < Decimal::ZERO) {
            return Err(invalid(format!(
                "fee below {} is negative ({})",
                step.below, step.fee
            )));
        }

        if let Some(step) = self.steps.iter().find(|s| s.fee > MAX_AMOUNT) {
            return Err(invalid(format!(
                "fee below {} exceeds {MAX_AMOUNT} ({})",
                step.below, step.fee
            )));
        }

        match self.tail {
            Tail::Flat { fee } if fee < Decimal::ZERO => {
                Err(invalid(format!("tail fee is negative ({fee})")))
            }
            Tail::Flat { fee } if fee > MAX_AMOUNT => {
                Err(invalid(format!("tail fee exceeds {MAX_AMOUNT} ({fee})")))
            }
            Tail::Rate { rate } if rate < Decimal::ZERO || rate > Decimal::ONE => {
                Err(invalid(format!("tail rate must be between 0 and 1 ({rate})")))
            }
            _ => Ok(()),
        }
    }

    /// Fee owed at `hammer`.
    #[must_use]
    pub fn lookup(&self, hammer: Money) -> Money {
        let idx = self.steps.partition_point(|step| step.below <= hammer);
        match self.steps.get(idx) {
            Some(step) => step.fee,
            None => self.tail.apply(hammer),
        }
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub const fn tail(&self) -> Tail {
        self.tail
    }

    /// Threshold at which the tail takes over.
    #[must_use]
    pub fn tail_start(&self) -> Money {
        self.steps.last().map_or(Decimal::ZERO, |s| s.below)
    }
}
