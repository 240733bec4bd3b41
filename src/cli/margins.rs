//! Handler for `margins`.

use serde_json::json;
use tabled::{Table, Tabled};

use super::output;
use crate::config::Config;
use crate::domain::TargetMargin;
use crate::error::Result;
use crate::preferences::PreferenceStore;

#[derive(Tabled)]
struct MarginRow {
    #[tabled(rename = "Margin")]
    margin: String,
    #[tabled(rename = "Ratio")]
    ratio: String,
    #[tabled(rename = "")]
    marker: &'static str,
}

fn marker(margin: TargetMargin, default: TargetMargin, saved: Option<TargetMargin>) -> &'static str {
    match (Some(margin) == saved, margin == default) {
        (true, true) => "saved, default",
        (true, false) => "saved",
        (false, true) => "default",
        (false, false) => "",
    }
}

/// Execute `margins`.
pub fn execute(config: &Config, store: &PreferenceStore) -> Result<()> {
    let default = config.default_margin();
    let saved = store.load()?.margin();

    if output::is_json() {
        let presets: Vec<_> = TargetMargin::presets()
            .map(|margin| {
                json!({
                    "ratio": margin.ratio(),
                    "label": margin.to_string(),
                    "default": margin == default,
                    "saved": Some(margin) == saved,
                })
            })
            .collect();
        output::json_output(json!({
            "command": "margins",
            "presets": presets,
            "default": default.ratio(),
            "saved": saved.map(TargetMargin::ratio),
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Target margin presets");

    let rows: Vec<MarginRow> = TargetMargin::presets()
        .map(|margin| MarginRow {
            margin: margin.to_string(),
            ratio: margin.ratio().to_string(),
            marker: marker(margin, default, saved),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    if let Some(saved) = saved.filter(|m| !m.is_preset()) {
        output::field("Saved", format!("{saved} (custom)"));
    }
    if !default.is_preset() {
        output::field("Default", format!("{default} (custom)"));
    }
    output::hint("any ratio in [0, 1) is accepted, e.g. --margin 0.18 or --margin 18%");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn margin(ratio: rust_decimal::Decimal) -> TargetMargin {
        TargetMargin::try_new(ratio).unwrap()
    }

    #[test]
    fn marks_saved_and_default() {
        let default = margin(dec!(0.25));
        assert_eq!(marker(margin(dec!(0.25)), default, None), "default");
        assert_eq!(marker(margin(dec!(0.2)), default, Some(margin(dec!(0.2)))), "saved");
        assert_eq!(
            marker(margin(dec!(0.25)), default, Some(margin(dec!(0.25)))),
            "saved, default"
        );
        assert_eq!(marker(margin(dec!(0.1)), default, None), "");
    }
}
