//! Command-line interface definitions.
//!
//! Defines the CLI structure for maxbid using `clap`. Numeric inputs are
//! taken as raw text and parsed leniently, so a blank or malformed amount
//! counts as zero rather than aborting the calculation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::paths;
use crate::domain::{Auction, TargetMargin};

/// Maximum profitable bid calculator for salvage vehicle auctions
#[derive(Parser, Debug)]
#[command(name = "maxbid")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file (defaults apply if it does not exist)
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Path to the saved preferences file
    #[arg(long, global = true, default_value_os_t = paths::default_preferences())]
    pub preferences: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the maxbid CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the maximum bid that still meets the target margin
    Calc(CalcArgs),

    /// Compute the maximum bid for every auction side by side
    Compare(InputArgs),

    /// Show fee tables or the fees at a hammer price
    Fees(FeesArgs),

    /// List target margin presets
    Margins,

    /// Manage saved preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Vehicle and target inputs shared by `calc` and `compare`.
///
/// Any value left out falls back to the saved preferences, then to the
/// configured defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Expected resale price
    #[arg(long, visible_alias = "sell-price")]
    pub sell: Option<String>,

    /// Estimated repair costs
    #[arg(long)]
    pub repairs: Option<String>,

    /// Towing/transport costs
    #[arg(long)]
    pub towing: Option<String>,

    /// Auction house (iaa, copart)
    #[arg(short, long)]
    pub auction: Option<Auction>,

    /// Target margin as a ratio or percent (0.25, 25%, 25)
    #[arg(short, long)]
    pub margin: Option<TargetMargin>,
}

/// Arguments for the `calc` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct CalcArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Your intended bid, to check profit and margin at that price
    #[arg(long)]
    pub bid: Option<String>,

    /// Do not save these inputs as preferences
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the `fees` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct FeesArgs {
    /// Auction house (iaa, copart)
    #[arg(short, long)]
    pub auction: Option<Auction>,

    /// Hammer price to resolve fees at; omit to list the fee table
    pub hammer: Option<String>,
}

/// Subcommands for `maxbid prefs`.
#[derive(Subcommand, Debug)]
pub enum PrefsCommand {
    /// Display saved preferences.
    Show,
    /// Save the default auction and/or target margin.
    Set(PrefsSetArgs),
    /// Delete saved preferences.
    Reset,
}

/// Arguments for `maxbid prefs set`.
#[derive(Args, Debug, Clone, Default)]
pub struct PrefsSetArgs {
    /// Auction house (iaa, copart)
    #[arg(short, long)]
    pub auction: Option<Auction>,

    /// Target margin as a ratio or percent
    #[arg(short, long)]
    pub margin: Option<TargetMargin>,
}

/// Subcommands for `maxbid config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

/// Arguments for `maxbid config init`.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
