//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::output;
use crate::config::Config;
use crate::domain::{format_usd, TargetMargin};
use crate::error::{ConfigError, Result};
use crate::fee::FeeResolver;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.init",
            "path": path.display().to_string(),
        }));
        return Ok(());
    }

    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!("2. Run: maxbid config validate -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path, config: &Config) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("(file not found, built-in defaults apply)");
    }

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Defaults");
    output::field("Auction", config.defaults.auction.as_str().to_uppercase());
    output::field("Target margin", config.default_margin());

    output::section("Solver");
    output::field("Bisection", format!("{} iterations", config.solver.bisection_iterations));

    let defaults = FeeResolver::default();
    output::section("Fee tables");
    output::field(
        "IAA",
        if config.fees.iaa == defaults.iaa {
            "built-in".to_string()
        } else {
            format!("custom ({} bands)", config.fees.iaa.bands().len())
        },
    );
    output::field(
        "Copart",
        if config.fees.copart == defaults.copart {
            "built-in".to_string()
        } else {
            format!(
                "custom ({} bidding steps, gate {})",
                config.fees.copart.bidding.steps().len(),
                format_usd(config.fees.copart.gate_fee)
            )
        },
    );
    output::hint("run `maxbid fees` to see the tables in full");

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    let mut warnings = Vec::new();
    if !TargetMargin::try_new(config.defaults.target_margin).is_ok_and(TargetMargin::is_preset) {
        warnings.push(format!(
            "default target margin {} is not one of the presets",
            config.default_margin()
        ));
    }
    if config.fees != FeeResolver::default() {
        warnings.push("fee tables differ from the built-in schedules".to_string());
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
            "warnings": warnings,
        }));
        return Ok(());
    }

    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");

    if !warnings.is_empty() {
        output::section("Warnings");
        for warning in &warnings {
            output::warning(warning);
        }
    }

    output::field("Next", format!("maxbid config show -c {}", path.display()));
    Ok(())
}
