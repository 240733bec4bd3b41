//! Composite stepped fee schedule (Copart, clean title, secured payment,
//! live bid).
//!
//! Total fees are the bidding fee and the virtual bid fee, each a step
//! table over the hammer price, plus flat gate and environmental fees.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::step::{StepTable, Tail};
use super::FeeSchedule;
use crate::domain::{format_usd, DomainError, FeeComponent, FeeResult, Money, MAX_AMOUNT};

/// Bidding fee table name, used in validation errors.
pub const BIDDING_TABLE: &str = "copart.bidding";
/// Virtual bid fee table name, used in validation errors.
pub const VIRTUAL_BID_TABLE: &str = "copart.virtual_bid";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeSchedule {
    pub bidding: StepTable,
    pub virtual_bid: StepTable,
    pub gate_fee: Money,
    pub environmental_fee: Money,
}

impl CompositeSchedule {
    /// Check every component table.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFeeTable`] for the first broken table or
    /// negative flat fee.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.bidding.validate(BIDDING_TABLE)?;
        self.virtual_bid.validate(VIRTUAL_BID_TABLE)?;

        let in_range = |fee: Money| fee >= Money::ZERO && fee <= MAX_AMOUNT;
        if !in_range(self.gate_fee) || !in_range(self.environmental_fee) {
            return Err(DomainError::InvalidFeeTable {
                table: "copart",
                reason: format!("flat fees must be between 0 and {MAX_AMOUNT}"),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn bidding_fee(&self, hammer: Money) -> Money {
        self.bidding.lookup(hammer)
    }

    #[must_use]
    pub fn virtual_bid_fee(&self, hammer: Money) -> Money {
        self.virtual_bid.lookup(hammer)
    }
}

impl FeeSchedule for CompositeSchedule {
    fn name(&self) -> &'static str {
        "copart"
    }

    fn evaluate(&self, hammer: Money) -> FeeResult {
        FeeResult::itemized(
            [
                (FeeComponent::Bidding, self.bidding_fee(hammer)),
                (FeeComponent::Virtual, self.virtual_bid_fee(hammer)),
                (FeeComponent::Gate, self.gate_fee),
                (FeeComponent::Environmental, self.environmental_fee),
            ],
            |total| format!("Copart Fees: {} (secured + live + gate)", format_usd(total)),
        )
    }
}

impl Default for CompositeSchedule {
    fn default() -> Self {
        Self {
            bidding: default_bidding_table(),
            virtual_bid: default_virtual_bid_table(),
            gate_fee: dec!(79),
            environmental_fee: dec!(0),
        }
    }
}

/// Bidding fees, secured payment methods, standard vehicles.
///
/// Several adjacent steps repeat the same fee; they are kept separate to
/// mirror the published schedule row for row.
fn default_bidding_table() -> StepTable {
    let steps = [
        (100, 1),
        (200, 25),
        (300, 50),
        (350, 75),
        (400, 75),
        (450, 110),
        (500, 110),
        (550, 125),
        (600, 130),
        (700, 140),
        (800, 155),
        (900, 170),
        (1000, 185),
        (1200, 200),
        (1300, 225),
        (1400, 240),
        (1500, 250),
        (1600, 260),
        (1700, 275),
        (1800, 285),
        (2000, 300),
        (2400, 325),
        (2500, 335),
        (3000, 350),
        (3500, 400),
        (4000, 455),
        (4500, 600),
        (5000, 625),
        (6000, 625),
        (6500, 675),
        (7000, 675),
        (7500, 675),
        (8000, 690),
        (8500, 715),
        (10000, 715),
        (10500, 720),
        (12500, 720),
        (15000, 720),
    ];

    StepTable::from_whole_dollars(steps, Tail::Rate { rate: dec!(0.0575) })
}

/// Virtual bid fees for live bidding.
fn default_virtual_bid_table() -> StepTable {
    let steps = [
        (100, 0),
        (500, 49),
        (1000, 59),
        (1500, 79),
        (2000, 89),
        (4000, 99),
        (6000, 109),
        (8000, 139),
    ];

    StepTable::from_whole_dollars(steps, Tail::Flat { fee: dec!(149) })
}
