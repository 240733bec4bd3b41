//! Handlers for `calc` and `compare`.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};
use tracing::debug;

use super::command::{CalcArgs, InputArgs};
use super::output;
use crate::calculator::BidCalculator;
use crate::config::Config;
use crate::domain::{format_percent, format_usd, parse_amount, Auction, Money, TargetMargin};
use crate::error::Result;
use crate::preferences::{PreferenceStore, Preferences, SavedInputs};
use crate::solver::{OutcomeAtBid, SolverInput, SolverOutput};

const MISSING_SELL_PRICE: &str = "Enter an expected sell price to calculate.";

/// Inputs after applying command line, then saved preferences, then config
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    pub raw: SavedInputs,
    pub sell_price: Money,
    pub repairs: Money,
    pub towing: Money,
    pub your_bid: Money,
    pub auction: Auction,
    pub margin: TargetMargin,
}

impl ResolvedInputs {
    /// Merge the layers. Raw text is kept so it can be saved verbatim.
    #[must_use]
    pub fn resolve(
        args: &InputArgs,
        bid: Option<&str>,
        prefs: &Preferences,
        config: &Config,
    ) -> Self {
        let pick = |arg: Option<&String>, saved: &str| -> String {
            arg.cloned().unwrap_or_else(|| saved.to_string())
        };

        let raw = SavedInputs {
            sell_price: pick(args.sell.as_ref(), &prefs.inputs.sell_price),
            repairs: pick(args.repairs.as_ref(), &prefs.inputs.repairs),
            towing: pick(args.towing.as_ref(), &prefs.inputs.towing),
            your_bid: bid.map_or_else(|| prefs.inputs.your_bid.clone(), str::to_string),
        };

        Self {
            sell_price: parse_amount(&raw.sell_price),
            repairs: parse_amount(&raw.repairs),
            towing: parse_amount(&raw.towing),
            your_bid: parse_amount(&raw.your_bid),
            auction: args
                .auction
                .or(prefs.auction)
                .unwrap_or(config.defaults.auction),
            margin: args
                .margin
                .or_else(|| prefs.margin())
                .unwrap_or_else(|| config.default_margin()),
            raw,
        }
    }

    #[must_use]
    pub fn solver_input(&self, auction: Auction) -> SolverInput {
        SolverInput {
            sell_price: self.sell_price,
            repairs: self.repairs,
            towing: self.towing,
            target_margin: self.margin,
            auction,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "sell_price": self.sell_price,
            "repairs": self.repairs,
            "towing": self.towing,
            "your_bid": self.your_bid,
            "auction": self.auction,
            "target_margin": self.margin.ratio(),
        })
    }
}

/// Execute `calc`.
pub fn execute(args: &CalcArgs, config: &Config, store: &PreferenceStore) -> Result<()> {
    let mut prefs = store.load()?;
    let inputs = ResolvedInputs::resolve(&args.inputs, args.bid.as_deref(), &prefs, config);
    debug!(?inputs, "resolved calculator inputs");

    if !args.no_save {
        prefs.inputs = inputs.raw.clone();
        prefs.auction = Some(inputs.auction);
        prefs.set_margin(inputs.margin);
        store.save(&mut prefs)?;
    }

    if inputs.sell_price <= Decimal::ZERO {
        output::json_output(json!({
            "command": "calc",
            "status": "missing_sell_price",
            "input": inputs.to_json(),
        }));
        output::note(MISSING_SELL_PRICE);
        return Ok(());
    }

    let calculator = config.calculator();
    let input = inputs.solver_input(inputs.auction);
    let (solved, at_max) = calculator.quote(&input);
    let at_bid = (inputs.your_bid > Decimal::ZERO).then(|| {
        calculator.evaluate_outcome(
            inputs.sell_price,
            inputs.repairs,
            inputs.towing,
            inputs.your_bid,
            inputs.auction,
        )
    });

    if output::is_json() {
        output::json_output(json!({
            "command": "calc",
            "status": "ok",
            "input": inputs.to_json(),
            "result": solved,
            "at_max_bid": at_max,
            "at_your_bid": at_bid,
        }));
        return Ok(());
    }

    render(&inputs, &solved, &at_max, at_bid.as_ref());
    Ok(())
}

fn render(
    inputs: &ResolvedInputs,
    solved: &SolverOutput,
    at_max: &OutcomeAtBid,
    at_bid: Option<&OutcomeAtBid>,
) {
    output::header(env!("CARGO_PKG_VERSION"));

    output::section("Max bid");
    output::field("Auction", inputs.auction.as_str().to_uppercase());
    output::field("Target margin", inputs.margin);
    output::field("Max bid", output::highlight(format_usd(solved.max_bid)));
    output::field("Fees", &solved.fee_info.label);
    output::field("Total cost", format_usd(at_max.total_cost));
    output::field(
        "Profit",
        output::signed(format_usd(at_max.profit), at_max.profit < Decimal::ZERO),
    );
    output::field("Margin", format_percent(at_max.margin, 1));

    if solved.used_fallback {
        output::warning("no fee band fits this budget; estimated with the conservative fallback fee");
    }
    if solved.max_bid.is_zero() && solved.budget < Decimal::ZERO {
        output::warning("repairs and towing already exceed the target; any bid loses money");
    }

    if let Some(at_bid) = at_bid {
        output::section(&format!("At your bid ({})", format_usd(at_bid.bid)));
        output::field(
            "Profit",
            output::signed(format_usd(at_bid.profit), at_bid.profit < Decimal::ZERO),
        );
        output::field(
            "Margin",
            output::signed(format_percent(at_bid.margin, 1), at_bid.margin < Decimal::ZERO),
        );
        output::field("Fees", &at_bid.fee_info.label);
        output::field("Total cost", format_usd(at_bid.total_cost));
    }

    output::section("Notes");
    output::note(inputs.auction.fee_note());
}

#[derive(Tabled)]
struct CompareRow {
    #[tabled(rename = "Auction")]
    auction: String,
    #[tabled(rename = "Max bid")]
    max_bid: String,
    #[tabled(rename = "Fees")]
    fees: String,
    #[tabled(rename = "Total cost")]
    total_cost: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Margin")]
    margin: String,
}

/// Execute `compare`.
pub fn compare(args: &InputArgs, config: &Config, store: &PreferenceStore) -> Result<()> {
    let prefs = store.load()?;
    let inputs = ResolvedInputs::resolve(args, None, &prefs, config);

    if inputs.sell_price <= Decimal::ZERO {
        output::json_output(json!({
            "command": "compare",
            "status": "missing_sell_price",
            "input": inputs.to_json(),
        }));
        output::note(MISSING_SELL_PRICE);
        return Ok(());
    }

    let calculator = config.calculator();
    let quotes = quote_all(&calculator, &inputs);

    if output::is_json() {
        let results: Vec<_> = quotes
            .iter()
            .map(|(auction, solved, outcome)| {
                json!({
                    "auction": auction,
                    "result": solved,
                    "at_max_bid": outcome,
                })
            })
            .collect();
        output::json_output(json!({
            "command": "compare",
            "status": "ok",
            "input": inputs.to_json(),
            "results": results,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&format!(
        "Max bid by auction (sell {}, margin {})",
        format_usd(inputs.sell_price),
        inputs.margin
    ));

    let rows: Vec<CompareRow> = quotes
        .iter()
        .map(|(auction, solved, outcome)| CompareRow {
            auction: auction.as_str().to_uppercase(),
            max_bid: format_usd(solved.max_bid),
            fees: format_usd(solved.fee_info.total_fees),
            total_cost: format_usd(outcome.total_cost),
            profit: format_usd(outcome.profit),
            margin: format_percent(outcome.margin, 1),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    if let Some((best, _, _)) = quotes.iter().max_by_key(|(_, solved, _)| solved.max_bid) {
        output::hint(&format!(
            "{} allows the highest bid",
            output::highlight(best.as_str().to_uppercase())
        ));
    }

    Ok(())
}

/// Solve every auction for the same inputs.
#[must_use]
pub fn quote_all(
    calculator: &BidCalculator,
    inputs: &ResolvedInputs,
) -> Vec<(Auction, SolverOutput, OutcomeAtBid)> {
    Auction::ALL
        .into_iter()
        .map(|auction| {
            let (solved, outcome) = calculator.quote(&inputs.solver_input(auction));
            (auction, solved, outcome)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn command_line_beats_preferences_beats_config() {
        let config = Config::default();
        let prefs = Preferences {
            auction: Some(Auction::Copart),
            target_margin: Some(dec!(0.15)),
            inputs: SavedInputs {
                sell_price: "8000".into(),
                repairs: "400".into(),
                towing: "100".into(),
                your_bid: String::new(),
            },
            updated_at: None,
        };
        let args = InputArgs {
            sell: Some("9000".into()),
            ..InputArgs::default()
        };

        let inputs = ResolvedInputs::resolve(&args, None, &prefs, &config);
        assert_eq!(inputs.sell_price, dec!(9000));
        assert_eq!(inputs.repairs, dec!(400));
        assert_eq!(inputs.auction, Auction::Copart);
        assert_eq!(inputs.margin.ratio(), dec!(0.15));
        assert_eq!(inputs.your_bid, Decimal::ZERO);
    }

    #[test]
    fn empty_layers_use_config_defaults() {
        let inputs = ResolvedInputs::resolve(
            &InputArgs::default(),
            None,
            &Preferences::default(),
            &Config::default(),
        );
        assert_eq!(inputs.auction, Auction::Iaa);
        assert_eq!(inputs.margin, TargetMargin::default());
        assert_eq!(inputs.sell_price, Decimal::ZERO);
    }

    #[test]
    fn garbage_amounts_count_as_zero() {
        let args = InputArgs {
            sell: Some("10000".into()),
            repairs: Some("lots".into()),
            ..InputArgs::default()
        };
        let inputs =
            ResolvedInputs::resolve(&args, Some("n/a"), &Preferences::default(), &Config::default());
        assert_eq!(inputs.repairs, Decimal::ZERO);
        assert_eq!(inputs.your_bid, Decimal::ZERO);
        assert_eq!(inputs.raw.repairs, "lots");
    }

    #[test]
    fn quote_all_covers_every_auction() {
        let inputs = ResolvedInputs::resolve(
            &InputArgs {
                sell: Some("10000".into()),
                repairs: Some("500".into()),
                towing: Some("200".into()),
                ..InputArgs::default()
            },
            None,
            &Preferences::default(),
            &Config::default(),
        );
        let quotes = quote_all(&BidCalculator::default(), &inputs);
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].0, Auction::Iaa);
        assert_eq!(quotes[0].1.max_bid, dec!(5895));
        assert!((quotes[1].1.max_bid - dec!(5987)).abs() < dec!(0.01));
    }
}
