//! Handler for `fees`.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::FeesArgs;
use super::output;
use crate::calculator::BidCalculator;
use crate::config::Config;
use crate::domain::{format_percent, format_usd, parse_amount, Auction};
use crate::error::Result;
use crate::fee::{BandedSchedule, CompositeSchedule, StepTable, Tail};

#[derive(Tabled)]
struct BandRow {
    #[tabled(rename = "Hammer")]
    range: String,
    #[tabled(rename = "Fee")]
    fee: String,
    #[tabled(rename = "Label")]
    label: String,
}

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "Hammer")]
    range: String,
    #[tabled(rename = "Fee")]
    fee: String,
}

/// Execute `fees`.
pub fn execute(args: &FeesArgs, config: &Config) -> Result<()> {
    let calculator = config.calculator();
    let auctions: Vec<Auction> = args.auction.map_or_else(|| Auction::ALL.to_vec(), |a| vec![a]);

    match args.hammer.as_deref() {
        Some(raw) => resolve_at(&calculator, &auctions, parse_amount(raw)),
        None => {
            list_tables(&calculator, &auctions);
            Ok(())
        }
    }
}

fn resolve_at(calculator: &BidCalculator, auctions: &[Auction], hammer: Decimal) -> Result<()> {
    let results: Vec<_> = auctions
        .iter()
        .map(|&auction| (auction, calculator.resolve_fees(auction, hammer)))
        .collect();

    if output::is_json() {
        let results: Vec<_> = results
            .iter()
            .map(|(auction, fees)| json!({ "auction": auction, "fees": fees }))
            .collect();
        output::json_output(json!({
            "command": "fees",
            "hammer": hammer,
            "results": results,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    for (auction, fees) in &results {
        output::section(&format!(
            "{} at {}",
            auction.as_str().to_uppercase(),
            format_usd(hammer)
        ));
        output::field("Total", output::highlight(format_usd(fees.total_fees)));
        output::field("Label", &fees.label);
        if fees.breakdown.len() > 1 {
            for (component, amount) in &fees.breakdown {
                output::field(&format!("  {component}"), format_usd(*amount));
            }
        }
    }
    Ok(())
}

fn list_tables(calculator: &BidCalculator, auctions: &[Auction]) {
    if output::is_json() {
        let tables: Vec<_> = auctions
            .iter()
            .map(|&auction| match auction {
                Auction::Iaa => json!({ "auction": auction, "schedule": calculator.banded_schedule() }),
                Auction::Copart => {
                    json!({ "auction": auction, "schedule": calculator.composite_schedule() })
                }
            })
            .collect();
        output::json_output(json!({ "command": "fees", "tables": tables }));
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    for auction in auctions {
        match auction {
            Auction::Iaa => render_banded(calculator.banded_schedule()),
            Auction::Copart => render_composite(calculator.composite_schedule()),
        }
        output::note(auction.fee_note());
    }
}

fn render_banded(schedule: &BandedSchedule) {
    output::section("IAA fee bands");

    let mut rows: Vec<BandRow> = schedule
        .bands()
        .iter()
        .map(|band| BandRow {
            range: format!("{} to {}", format_usd(band.min), format_usd(band.max)),
            fee: format_usd(band.fee),
            label: band.label.clone(),
        })
        .collect();
    rows.push(BandRow {
        range: "anything else".into(),
        fee: format_usd(schedule.fallback().fee),
        label: schedule.fallback().label.clone(),
    });

    output::lines(&Table::new(rows).to_string());
}

fn render_composite(schedule: &CompositeSchedule) {
    output::section("Copart bidding fee");
    output::lines(&step_table(&schedule.bidding));

    output::section("Copart virtual bid fee");
    output::lines(&step_table(&schedule.virtual_bid));

    output::section("Copart flat fees");
    output::field("Gate", format_usd(schedule.gate_fee));
    output::field("Environmental", format_usd(schedule.environmental_fee));
}

fn step_table(table: &StepTable) -> String {
    let mut from = Decimal::ZERO;
    let mut rows: Vec<StepRow> = table
        .steps()
        .iter()
        .map(|step| {
            let row = StepRow {
                range: format!("{} to under {}", format_usd(from), format_usd(step.below)),
                fee: format_usd(step.fee),
            };
            from = step.below;
            row
        })
        .collect();

    rows.push(StepRow {
        range: format!("{} and up", format_usd(table.tail_start())),
        fee: tail_description(table.tail()),
    });

    Table::new(rows).to_string()
}

fn tail_description(tail: Tail) -> String {
    match tail {
        Tail::Flat { fee } => format_usd(fee),
        Tail::Rate { rate } => format!("{} of hammer", format_percent(rate, 2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn step_table_lists_every_step_and_the_tail() {
        let rendered = step_table(&CompositeSchedule::default().virtual_bid);
        assert!(rendered.contains("$0.00 to under $100.00"));
        assert!(rendered.contains("and up"));
        assert!(rendered.contains("$149.00"));
    }

    #[test]
    fn rate_tail_is_shown_as_percent() {
        let text = tail_description(Tail::Rate { rate: dec!(0.0575) });
        assert!(text.starts_with("5.75%"));
    }
}
