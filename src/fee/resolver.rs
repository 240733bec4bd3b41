//! Dispatch from auction selector to fee schedule.

use serde::{Deserialize, Serialize};

use super::{BandedSchedule, CompositeSchedule, FeeSchedule};
use crate::domain::{Auction, DomainError, FeeResult, Money};

/// Both auction fee schedules, resolved by [`Auction`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeResolver {
    #[serde(default)]
    pub iaa: BandedSchedule,
    #[serde(default)]
    pub copart: CompositeSchedule,
}

impl FeeResolver {
    #[must_use]
    pub const fn new(iaa: BandedSchedule, copart: CompositeSchedule) -> Self {
        Self { iaa, copart }
    }

    /// Validate both schedules.
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainError::InvalidFeeTable`] found.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.iaa.validate()?;
        self.copart.validate()
    }

    /// Fees for `auction` at `hammer`.
    #[must_use]
    pub fn resolve(&self, auction: Auction, hammer: Money) -> FeeResult {
        self.schedule(auction).evaluate(hammer)
    }

    /// The schedule for `auction`.
    #[must_use]
    pub fn schedule(&self, auction: Auction) -> &dyn FeeSchedule {
        match auction {
            Auction::Iaa => &self.iaa,
            Auction::Copart => &self.copart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeeComponent;
    use rust_decimal_macros::dec;

    #[test]
    fn dispatches_by_auction() {
        let resolver = FeeResolver::default();

        let iaa = resolver.resolve(Auction::Iaa, dec!(1000));
        assert_eq!(iaa.total_fees, dec!(485));
        assert_eq!(iaa.component(FeeComponent::Total), Some(dec!(485)));

        let copart = resolver.resolve(Auction::Copart, dec!(1000));
        assert_eq!(copart.total_fees, dec!(200) + dec!(79) + dec!(79));
        assert!(copart.component(FeeComponent::Bidding).is_some());
    }

    #[test]
    fn schedule_names_match_selectors() {
        let resolver = FeeResolver::default();
        for auction in Auction::ALL {
            assert_eq!(resolver.schedule(auction).name(), auction.as_str());
        }
    }
}
