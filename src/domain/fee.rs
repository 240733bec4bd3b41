//! Fee evaluation results.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Money;

/// Named component of an itemized fee breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeComponent {
    /// Single flat fee covering everything (banded schedules).
    Total,
    /// Hammer-price dependent bidding fee.
    Bidding,
    /// Virtual/live bid surcharge.
    Virtual,
    /// Flat gate fee.
    Gate,
    /// Flat environmental fee.
    #[serde(rename = "env")]
    Environmental,
}

impl FeeComponent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Bidding => "bidding",
            Self::Virtual => "virtual",
            Self::Gate => "gate",
            Self::Environmental => "env",
        }
    }
}

impl fmt::Display for FeeComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fees owed at a given hammer price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeResult {
    /// Sum of all components.
    pub total_fees: Money,
    /// Human-readable description of the band or composite.
    pub label: String,
    /// Itemized components, ordered by [`FeeComponent`].
    pub breakdown: BTreeMap<FeeComponent, Money>,
}

impl FeeResult {
    /// A single flat fee with a `total` breakdown entry.
    #[must_use]
    pub fn flat(fee: Money, label: impl Into<String>) -> Self {
        Self {
            total_fees: fee,
            label: label.into(),
            breakdown: BTreeMap::from([(FeeComponent::Total, fee)]),
        }
    }

    /// Build from itemized components; the total is their sum.
    #[must_use]
    pub fn itemized(
        components: impl IntoIterator<Item = (FeeComponent, Money)>,
        label: impl FnOnce(Money) -> String,
    ) -> Self {
        let breakdown: BTreeMap<FeeComponent, Money> = components.into_iter().collect();
        let total_fees = breakdown.values().copied().sum::<Decimal>();
        Self {
            total_fees,
            label: label(total_fees),
            breakdown,
        }
    }

    /// Amount for one component, if present.
    #[must_use]
    pub fn component(&self, component: FeeComponent) -> Option<Money> {
        self.breakdown.get(&component).copied()
    }
}
