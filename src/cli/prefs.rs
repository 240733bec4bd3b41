//! Handlers for the `prefs` command group.

use serde_json::json;

use super::command::PrefsSetArgs;
use super::output;
use crate::domain::{format_usd, parse_amount};
use crate::error::{ConfigError, Result};
use crate::preferences::PreferenceStore;

/// Execute `prefs show`.
pub fn execute_show(store: &PreferenceStore) -> Result<()> {
    let prefs = store.load()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "prefs.show",
            "path": store.path().display().to_string(),
            "preferences": prefs,
        }));
        return Ok(());
    }

    output::section("Saved Preferences");
    output::field("Path", store.path().display());

    if prefs == Default::default() {
        output::note("(nothing saved yet)");
        return Ok(());
    }

    output::field(
        "Auction",
        prefs
            .auction
            .map_or_else(|| "-".to_string(), |a| a.as_str().to_uppercase()),
    );
    output::field(
        "Target margin",
        prefs
            .margin()
            .map_or_else(|| "-".to_string(), |m| m.to_string()),
    );

    let amount = |raw: &str| {
        if raw.trim().is_empty() {
            output::muted("-")
        } else {
            format_usd(parse_amount(raw))
        }
    };
    output::field("Sell price", amount(&prefs.inputs.sell_price));
    output::field("Repairs", amount(&prefs.inputs.repairs));
    output::field("Towing", amount(&prefs.inputs.towing));
    output::field("Your bid", amount(&prefs.inputs.your_bid));

    if let Some(updated_at) = prefs.updated_at {
        output::field("Updated", updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    Ok(())
}

/// Execute `prefs set`.
pub fn execute_set(args: &PrefsSetArgs, store: &PreferenceStore) -> Result<()> {
    if args.auction.is_none() && args.margin.is_none() {
        return Err(ConfigError::InvalidValue {
            field: "prefs",
            reason: "nothing to set (pass --auction and/or --margin)".to_string(),
        }
        .into());
    }

    let mut prefs = store.load()?;
    if let Some(auction) = args.auction {
        prefs.auction = Some(auction);
    }
    if let Some(margin) = args.margin {
        prefs.set_margin(margin);
    }
    store.save(&mut prefs)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "prefs.set",
            "path": store.path().display().to_string(),
            "preferences": prefs,
        }));
        return Ok(());
    }

    output::success("Preferences saved");
    if let Some(auction) = args.auction {
        output::field("Auction", auction.as_str().to_uppercase());
    }
    if let Some(margin) = args.margin {
        output::field("Target margin", margin);
    }
    Ok(())
}

/// Execute `prefs reset`.
pub fn execute_reset(store: &PreferenceStore) -> Result<()> {
    let removed = store.reset()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "prefs.reset",
            "path": store.path().display().to_string(),
            "removed": removed,
        }));
        return Ok(());
    }

    if removed {
        output::success("Preferences cleared");
    } else {
        output::note("No saved preferences to clear");
    }
    Ok(())
}
