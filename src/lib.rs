//! maxbid - maximum profitable bid calculator for salvage vehicle auctions.
//!
//! Given an expected resale price, repair and towing costs, and a target
//! margin, the crate finds the highest hammer price at which buyer fees and
//! costs still leave that margin.
//!
//! # Modules
//!
//! - [`domain`] - Money helpers, auctions, margins, and fee results
//! - [`fee`] - Fee schedules: IAA flat-fee bands and Copart stepped tables
//! - [`solver`] - Max-bid search and outcome evaluation
//! - [`calculator`] - Facade bundling fee tables with solver settings
//! - [`config`] - Optional TOML configuration and logging setup
//! - [`preferences`] - Saved auction, margin, and inputs between runs
//! - [`cli`] - The `maxbid` command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use maxbid::calculator::BidCalculator;
//! use maxbid::domain::{Auction, TargetMargin};
//! use maxbid::solver::SolverInput;
//! use rust_decimal_macros::dec;
//!
//! let input = SolverInput {
//!     sell_price: dec!(10000),
//!     repairs: dec!(500),
//!     towing: dec!(200),
//!     target_margin: TargetMargin::default(),
//!     auction: Auction::Copart,
//! };
//! let output = BidCalculator::default().solve_max_bid(&input);
//! assert!((output.max_bid - dec!(5987)).abs() < dec!(0.01));
//! ```

pub mod calculator;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod fee;
pub mod preferences;
pub mod solver;
