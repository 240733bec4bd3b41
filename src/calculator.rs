//! Calculator facade over fee resolution, max-bid solving, and outcome
//! evaluation.
//!
//! # Example
//!
//! ```
//! use maxbid::calculator::BidCalculator;
//! use maxbid::domain::{Auction, TargetMargin};
//! use maxbid::solver::SolverInput;
//! use rust_decimal_macros::dec;
//!
//! let calculator = BidCalculator::default();
//! let output = calculator.solve_max_bid(&SolverInput {
//!     sell_price: dec!(10000),
//!     repairs: dec!(500),
//!     towing: dec!(200),
//!     target_margin: TargetMargin::default(),
//!     auction: Auction::Iaa,
//! });
//! assert_eq!(output.max_bid, dec!(5895));
//! ```

use crate::domain::{Auction, FeeResult, Money};
use crate::fee::{BandedSchedule, CompositeSchedule, FeeResolver};
use crate::solver::{
    evaluate_outcome, MaxBidSolver, OutcomeAtBid, SolverConfig, SolverInput, SolverOutput,
};

/// Owns the fee schedules and solver settings for a session.
#[derive(Debug, Clone, Default)]
pub struct BidCalculator {
    fees: FeeResolver,
    solver: SolverConfig,
}

impl BidCalculator {
    #[must_use]
    pub const fn new(fees: FeeResolver, solver: SolverConfig) -> Self {
        Self { fees, solver }
    }

    /// Fees at `hammer` for `auction`.
    #[must_use]
    pub fn resolve_fees(&self, auction: Auction, hammer: Money) -> FeeResult {
        self.fees.resolve(auction, hammer)
    }

    /// Largest bid meeting the target margin.
    #[must_use]
    pub fn solve_max_bid(&self, input: &SolverInput) -> SolverOutput {
        MaxBidSolver::new(&self.fees, self.solver).solve(input)
    }

    /// Cost, profit, and margin if the hammer falls at `bid`.
    #[must_use]
    pub fn evaluate_outcome(
        &self,
        sell_price: Money,
        repairs: Money,
        towing: Money,
        bid: Money,
        auction: Auction,
    ) -> OutcomeAtBid {
        evaluate_outcome(&self.fees, sell_price, repairs, towing, bid, auction)
    }

    /// Solve, then evaluate the outcome at the max bid.
    #[must_use]
    pub fn quote(&self, input: &SolverInput) -> (SolverOutput, OutcomeAtBid) {
        let solved = self.solve_max_bid(input);
        let outcome = self.evaluate_outcome(
            input.sell_price,
            input.repairs,
            input.towing,
            solved.max_bid,
            input.auction,
        );
        (solved, outcome)
    }

    /// Read access to both fee schedules.
    #[must_use]
    pub const fn schedules(&self) -> &FeeResolver {
        &self.fees
    }

    #[must_use]
    pub const fn banded_schedule(&self) -> &BandedSchedule {
        &self.fees.iaa
    }

    #[must_use]
    pub const fn composite_schedule(&self) -> &CompositeSchedule {
        &self.fees.copart
    }
}
