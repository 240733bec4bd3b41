//! Max bid by bisection over a stepped fee schedule.

use rust_decimal::Decimal;
use tracing::trace;

use crate::domain::{clamp0, Money};
use crate::fee::FeeSchedule;

/// Largest bid in `[0, max(0, budget)]` with `bid + fees(bid) <= budget`.
///
/// Runs exactly `iterations` halvings. `lo` only ever moves to a feasible
/// midpoint and `hi` only to an infeasible one, so `lo` is feasible (or the
/// initial zero) on return.
pub(super) fn solve(schedule: &dyn FeeSchedule, budget: Money, iterations: u32) -> Money {
    let mut lo = Decimal::ZERO;
    let mut hi = clamp0(budget);

    for step in 0..iterations {
        let mid = (lo + hi) / Decimal::TWO;
        let total_cost = mid + schedule.total(mid);
        let feasible = total_cost <= budget;

        trace!(step, lo = %lo, hi = %hi, mid = %mid, total_cost = %total_cost, feasible);

        if feasible {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    clamp0(lo)
}
