//! Application configuration loading and validation.
//!
//! Configuration is an optional TOML file. Every section has defaults, so a
//! missing file yields the reference fee tables, a 25% target margin, and
//! IAA as the default auction.

mod logging;

pub use logging::{LoggingConfig, LOG_FORMATS};

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::calculator::BidCalculator;
use crate::domain::{Auction, TargetMargin, DEFAULT_MARGIN};
use crate::error::{ConfigError, Result};
use crate::fee::FeeResolver;
use crate::solver::{SolverConfig, MAX_BISECTION_ITERATIONS};

/// Settings applied when neither the command line nor saved preferences
/// provide a value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub auction: Auction,
    /// Target margin ratio, validated to lie in `[0, 1)`.
    #[serde(default = "default_target_margin")]
    pub target_margin: Decimal,
}

fn default_target_margin() -> Decimal {
    DEFAULT_MARGIN
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            auction: Auction::default(),
            target_margin: default_target_margin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    /// Replaceable fee tables for each auction.
    #[serde(default)]
    pub fees: FeeResolver,
}

impl Config {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation, or a domain error if a fee table is malformed.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        Self::parse(path, content)
    }

    /// Load a configuration file, or use defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for a file that exists.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse and validate TOML text.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    #[allow(clippy::result_large_err)]
    pub fn parse(path: &Path, content: String) -> Result<Self> {
        let config: Self = match toml::from_str(&content) {
            Ok(config) => config,
            Err(error) => {
                return Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    src: content,
                    error,
                }
                .into())
            }
        };

        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            }
            .into());
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!(
                    "expected one of {}, got '{}'",
                    LOG_FORMATS.join(", "),
                    self.logging.format
                ),
            }
            .into());
        }

        if let Err(e) = TargetMargin::try_new(self.defaults.target_margin) {
            return Err(ConfigError::InvalidValue {
                field: "target_margin",
                reason: e.to_string(),
            }
            .into());
        }

        let iterations = self.solver.bisection_iterations;
        if iterations == 0 || iterations > MAX_BISECTION_ITERATIONS {
            return Err(ConfigError::InvalidValue {
                field: "bisection_iterations",
                reason: format!("must be between 1 and {MAX_BISECTION_ITERATIONS}, got {iterations}"),
            }
            .into());
        }

        self.fees.validate()?;
        Ok(())
    }

    /// Default target margin, already validated.
    #[must_use]
    pub fn default_margin(&self) -> TargetMargin {
        TargetMargin::try_new(self.defaults.target_margin).unwrap_or_default()
    }

    /// Build a calculator from the configured fee tables and solver settings.
    #[must_use]
    pub fn calculator(&self) -> BidCalculator {
        BidCalculator::new(self.fees.clone(), self.solver)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self, level_override: Option<&str>) {
        self.logging.init(level_override);
    }
}
