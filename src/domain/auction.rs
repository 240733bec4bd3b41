//! Auction house selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Supported auction houses.
///
/// Each auction maps to exactly one fee schedule shape: IAA uses a handful
/// of flat-fee bands, Copart a composite of stepped tables and surcharges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Auction {
    #[default]
    Iaa,
    Copart,
}

impl Auction {
    /// All supported auctions, in display order.
    pub const ALL: [Auction; 2] = [Auction::Iaa, Auction::Copart];

    /// Lowercase selector used in config files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Iaa => "iaa",
            Self::Copart => "copart",
        }
    }

    /// Short description of which fees the schedule models.
    #[must_use]
    pub const fn fee_note(self) -> &'static str {
        match self {
            Self::Iaa => "IAA: dealer fee bands from your receipts.",
            Self::Copart => "Copart: secured payment + live virtual bid + gate fee (clean title).",
        }
    }
}

impl fmt::Display for Auction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Auction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iaa" => Ok(Self::Iaa),
            "copart" => Ok(Self::Copart),
            _ => Err(DomainError::UnknownAuction {
                value: s.to_string(),
            }),
        }
    }
}
