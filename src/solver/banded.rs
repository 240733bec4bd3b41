//! Max bid over a banded fee schedule.
//!
//! Within one band the fee is constant, so the best bid in that band is
//! `budget - band.fee` whenever that value actually lands inside the band.
//! The answer is the largest such in-band candidate.

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{clamp0, FeeResult, Money};
use crate::fee::{BandedSchedule, FeeSchedule};

/// Outcome of the banded search.
pub(super) struct BandedSolution {
    pub max_bid: Money,
    pub fee_info: FeeResult,
    pub used_fallback: bool,
}

/// Largest in-band candidate, or the fallback estimate when none exists.
///
/// When no band admits a positive candidate, the bid is computed as if the
/// fallback fee applied (`budget - fallback`) and fees are re-resolved at
/// that bid for reporting. The re-resolved fee may differ from the fallback
/// used to pick the bid; this is a known approximation.
pub(super) fn solve(schedule: &BandedSchedule, budget: Money) -> BandedSolution {
    let mut best_bid = Decimal::ZERO;
    let mut best_fees = schedule.evaluate(Decimal::ZERO);

    for band in schedule.bands() {
        let candidate = budget - band.fee;
        if band.contains(candidate) && candidate > best_bid {
            best_bid = candidate;
            best_fees = band.fee_result();
        }
    }

    if best_bid.is_zero() {
        let guess = clamp0(budget - schedule.fallback().fee);
        debug!(
            budget = %budget,
            fallback_fee = %schedule.fallback().fee,
            bid = %guess,
            "no band admits an in-range bid, using fallback fee"
        );
        return BandedSolution {
            max_bid: guess,
            fee_info: schedule.evaluate(guess),
            used_fallback: true,
        };
    }

    BandedSolution {
        max_bid: best_bid,
        fee_info: best_fees,
        used_fallback: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn picks_highest_in_band_candidate() {
        let schedule = BandedSchedule::default();

        let solution = solve(&schedule, dec!(3000));
        assert_eq!(solution.max_bid, dec!(2160));
        assert_eq!(solution.fee_info.total_fees, dec!(840));
        assert!(!solution.used_fallback);

        let solution = solve(&schedule, dec!(2200));
        assert_eq!(solution.max_bid, dec!(1715));
        assert_eq!(solution.fee_info.total_fees, dec!(485));
    }

    #[test]
    fn top_band_candidate() {
        let solution = solve(&BandedSchedule::default(), dec!(7500));
        assert_eq!(solution.max_bid, dec!(6595));
        assert_eq!(solution.fee_info.total_fees, dec!(905));
    }

    #[test]
    fn band_gap_falls_back_and_reresolves_fees() {
        // 2600 - 485 = 2115 is above band 1, 2600 - 840 = 1760 below band 2.
        let solution = solve(&BandedSchedule::default(), dec!(2600));
        assert!(solution.used_fallback);
        assert_eq!(solution.max_bid, dec!(1600));
        assert_eq!(solution.fee_info.total_fees, dec!(485));
    }

    #[test]
    fn above_last_band_uses_fallback_fee() {
        let solution = solve(&BandedSchedule::default(), dec!(10000));
        assert!(solution.used_fallback);
        assert_eq!(solution.max_bid, dec!(9000));
        assert_eq!(solution.fee_info.total_fees, dec!(1000));
    }

    #[test]
    fn negative_budget_yields_zero_bid() {
        let solution = solve(&BandedSchedule::default(), dec!(-1000));
        assert_eq!(solution.max_bid, Decimal::ZERO);
        assert_eq!(solution.fee_info.total_fees, dec!(485));
    }
}
