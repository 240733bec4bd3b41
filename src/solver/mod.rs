//! Max-bid solver.
//!
//! Finds the largest hammer price `bid` such that
//!
//! ```text
//! bid + fees(bid) + repairs + towing <= (1 - margin) * sell_price
//! ```
//!
//! Fees depend on the bid itself, so the constraint is a fixed-point problem
//! over a step function. The algorithm follows the schedule shape:
//!
//! - banded schedules: closed-form candidate per band
//! - composite schedules: fixed-iteration bisection

mod banded;
mod bisection;
mod outcome;

pub use outcome::{evaluate_outcome, OutcomeAtBid};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{bound_amount, clamp0, Auction, FeeResult, Money, TargetMargin};
use crate::fee::FeeResolver;

/// Inputs to one max-bid computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverInput {
    pub sell_price: Money,
    pub repairs: Money,
    pub towing: Money,
    pub target_margin: TargetMargin,
    pub auction: Auction,
}

impl SolverInput {
    /// Allowed spend on bid plus fees: `(1 - margin) * sell - repairs - towing`.
    ///
    /// May be negative; the sign is kept for feasibility checks. Each amount
    /// is first limited to [`MAX_AMOUNT`](crate::domain::MAX_AMOUNT).
    #[must_use]
    pub fn budget(&self) -> Money {
        (Decimal::ONE - self.target_margin.ratio()) * bound_amount(self.sell_price)
            - bound_amount(self.repairs)
            - bound_amount(self.towing)
    }
}

/// Largest feasible bid and the fees that apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverOutput {
    /// Never negative.
    pub max_bid: Money,
    pub fee_info: FeeResult,
    /// Signed budget the bid was solved against.
    pub budget: Money,
    /// Banded schedules only: no band admitted an in-range bid and the
    /// fallback fee was assumed.
    pub used_fallback: bool,
}

/// Solver tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Halvings performed by the bisection search.
    #[serde(default = "default_bisection_iterations")]
    pub bisection_iterations: u32,
}

/// Halvings that shrink a $1M range below a ten-thousandth of a cent.
pub const DEFAULT_BISECTION_ITERATIONS: u32 = 45;

/// Upper bound accepted from configuration.
pub const MAX_BISECTION_ITERATIONS: u32 = 200;

const fn default_bisection_iterations() -> u32 {
    DEFAULT_BISECTION_ITERATIONS
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            bisection_iterations: default_bisection_iterations(),
        }
    }
}

/// Max-bid solver over a set of fee schedules.
///
/// Stateless: every call works only on its arguments and the borrowed
/// schedules.
#[derive(Debug, Clone, Copy)]
pub struct MaxBidSolver<'a> {
    fees: &'a FeeResolver,
    config: SolverConfig,
}

impl<'a> MaxBidSolver<'a> {
    #[must_use]
    pub const fn new(fees: &'a FeeResolver, config: SolverConfig) -> Self {
        Self { fees, config }
    }

    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Compute the largest bid that still meets the target margin.
    ///
    /// Callers should skip solving when `sell_price <= 0`; if they do not,
    /// the budget is negative and the result degenerates to a zero bid.
    #[must_use]
    pub fn solve(&self, input: &SolverInput) -> SolverOutput {
        let budget = input.budget();

        let output = match input.auction {
            Auction::Iaa => {
                let solution = banded::solve(&self.fees.iaa, budget);
                SolverOutput {
                    max_bid: clamp0(solution.max_bid),
                    fee_info: solution.fee_info,
                    budget,
                    used_fallback: solution.used_fallback,
                }
            }
            Auction::Copart => {
                let bid = bisection::solve(
                    &self.fees.copart,
                    budget,
                    self.config.bisection_iterations,
                );
                SolverOutput {
                    max_bid: bid,
                    fee_info: self.fees.resolve(Auction::Copart, bid),
                    budget,
                    used_fallback: false,
                }
            }
        };

        debug!(
            auction = %input.auction,
            budget = %budget,
            max_bid = %output.max_bid,
            fees = %output.fee_info.total_fees,
            used_fallback = output.used_fallback,
            "solved max bid"
        );

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(auction: Auction) -> SolverInput {
        SolverInput {
            sell_price: dec!(10000),
            repairs: dec!(500),
            towing: dec!(200),
            target_margin: TargetMargin::default(),
            auction,
        }
    }

    #[test]
    fn budget_subtracts_margin_and_costs() {
        assert_eq!(input(Auction::Copart).budget(), dec!(6800));
    }

    #[test]
    fn dispatches_copart_to_bisection() {
        let fees = FeeResolver::default();
        let output = MaxBidSolver::new(&fees, SolverConfig::default()).solve(&input(Auction::Copart));
        assert!((output.max_bid - dec!(5987)).abs() < dec!(0.01));
        assert_eq!(output.fee_info.total_fees, dec!(813));
        assert!(!output.used_fallback);
    }

    #[test]
    fn dispatches_iaa_to_band_search() {
        let fees = FeeResolver::default();
        let output = MaxBidSolver::new(&fees, SolverConfig::default()).solve(&input(Auction::Iaa));
        // 6800 - 905 = 5895 lands in the $5k-$7k band.
        assert_eq!(output.max_bid, dec!(5895));
        assert_eq!(output.fee_info.total_fees, dec!(905));
    }

    #[test]
    fn extreme_inputs_do_not_overflow() {
        let fees = FeeResolver::default();
        let solver = MaxBidSolver::new(&fees, SolverConfig::default());
        for auction in Auction::ALL {
            let output = solver.solve(&SolverInput {
                sell_price: Decimal::MAX,
                repairs: Decimal::MIN,
                towing: dec!(0),
                target_margin: TargetMargin::try_new(dec!(0)).unwrap(),
                auction,
            });
            assert!(output.max_bid > dec!(0));
            assert!(output.max_bid <= output.budget);
        }
    }

    #[test]
    fn default_iterations() {
        assert_eq!(SolverConfig::default().bisection_iterations, 45);
    }
}
