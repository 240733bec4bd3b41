//! Auction-agnostic domain types.

mod auction;
pub mod error;
mod fee;
mod margin;
mod money;

pub use auction::Auction;
pub use error::DomainError;
pub use fee::{FeeComponent, FeeResult};
pub use margin::{TargetMargin, DEFAULT_MARGIN, MARGIN_PRESETS};
pub use money::{
    bound_amount, clamp0, format_percent, format_usd, parse_amount, Money, Ratio, MAX_AMOUNT,
};
