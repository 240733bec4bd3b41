//! Auction fee schedules.
//!
//! Fees are a pure function of the hammer price. Each auction house has its
//! own schedule shape:
//!
//! - [`BandedSchedule`] - a few closed bands with flat fees and a
//!   conservative fallback above the last band (IAA)
//! - [`CompositeSchedule`] - two [`StepTable`]s plus flat surcharges, with a
//!   linear tail on the bidding fee (Copart)
//!
//! [`FeeResolver`] dispatches on [`Auction`](crate::domain::Auction) and
//! returns a uniform [`FeeResult`].
//!
//! # Example
//!
//! ```
//! use maxbid::domain::Auction;
//! use maxbid::fee::FeeResolver;
//! use rust_decimal_macros::dec;
//!
//! let resolver = FeeResolver::default();
//! assert_eq!(resolver.resolve(Auction::Iaa, dec!(2000)).total_fees, dec!(840));
//! ```

mod banded;
mod composite;
mod resolver;
mod step;

pub use banded::{BandedSchedule, FallbackFee, FeeBand};
pub use composite::{CompositeSchedule, BIDDING_TABLE, VIRTUAL_BID_TABLE};
pub use resolver::FeeResolver;
pub use step::{Step, StepTable, Tail};

use crate::domain::{FeeResult, Money};

/// A fee schedule evaluated at a hammer price.
///
/// Implementations hold only immutable table data, so one schedule can be
/// shared freely across threads and calls.
pub trait FeeSchedule: Send + Sync {
    /// Identifier used in logs and validation errors.
    fn name(&self) -> &'static str;

    /// Fees owed when the hammer falls at `hammer`. Never negative.
    fn evaluate(&self, hammer: Money) -> FeeResult;

    /// Convenience for callers that only need the total.
    fn total(&self, hammer: Money) -> Money {
        self.evaluate(hammer).total_fees
    }
}
