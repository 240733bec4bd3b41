//! Profit and margin at a candidate bid.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{bound_amount, Auction, FeeResult, Money, Ratio};
use crate::fee::FeeResolver;

/// Cost and profit figures at one bid.
///
/// Profit and margin are not clamped: negative values mean the bid loses
/// money at the expected resale price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeAtBid {
    pub bid: Money,
    pub profit: Money,
    pub margin: Ratio,
    pub total_cost: Money,
    pub fee_info: FeeResult,
}

impl OutcomeAtBid {
    #[must_use]
    pub fn is_profitable(&self) -> bool {
        self.profit > Decimal::ZERO
    }
}

/// Evaluate total cost, profit, and margin if the hammer falls at `bid`.
///
/// Amounts beyond [`MAX_AMOUNT`](crate::domain::MAX_AMOUNT) are limited to it.
#[must_use]
pub fn evaluate_outcome(
    fees: &FeeResolver,
    sell_price: Money,
    repairs: Money,
    towing: Money,
    bid: Money,
    auction: Auction,
) -> OutcomeAtBid {
    let (sell_price, repairs, towing, bid) = (
        bound_amount(sell_price),
        bound_amount(repairs),
        bound_amount(towing),
        bound_amount(bid),
    );

    let fee_info = fees.resolve(auction, bid);
    let total_cost = bid + fee_info.total_fees + repairs + towing;
    let profit = sell_price - total_cost;
    let margin = if sell_price > Decimal::ZERO {
        profit / sell_price
    } else {
        Decimal::ZERO
    };

    OutcomeAtBid {
        bid,
        profit,
        margin,
        total_cost,
        fee_info,
    }
}
