//! Monetary types and lenient amount parsing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// Money represented as a Decimal for precision.
///
/// Fees and costs are non-negative; profit may go negative.
pub type Money = Decimal;

/// A dimensionless ratio such as a target or realized margin.
pub type Ratio = Decimal;

/// Largest magnitude accepted for any single amount: one quadrillion.
///
/// Sums and products of a few bounded amounts stay far below the range of
/// `Decimal`, so fee and cost arithmetic cannot overflow.
pub const MAX_AMOUNT: Money = dec!(1000000000000000);

/// Parse a user-entered amount, treating anything unusable as zero.
///
/// Accepts plain decimals, scientific notation, and the usual currency
/// decorations (`$`, `,`, `_`). Empty or invalid text yields zero, and so
/// does any amount whose magnitude exceeds [`MAX_AMOUNT`].
#[must_use]
pub fn parse_amount(raw: &str) -> Money {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_'))
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    match cleaned
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&cleaned))
    {
        Ok(value) if value.abs() <= MAX_AMOUNT => value,
        Ok(value) => {
            debug!(input = raw, %value, limit = %MAX_AMOUNT, "amount out of range, using 0");
            Decimal::ZERO
        }
        Err(e) => {
            debug!(input = raw, error = %e, "unparseable amount, using 0");
            Decimal::ZERO
        }
    }
}

/// Limit an amount to `[-MAX_AMOUNT, MAX_AMOUNT]`.
#[must_use]
pub fn bound_amount(value: Money) -> Money {
    value.clamp(-MAX_AMOUNT, MAX_AMOUNT)
}

/// Clamp a value at zero.
#[must_use]
pub fn clamp0(value: Money) -> Money {
    value.max(Decimal::ZERO)
}

/// Render an amount as US dollars, e.g. `$1,234.56` or `-$12.00`.
#[must_use]
pub fn format_usd(amount: Money) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}

/// Render a ratio as a percentage with the given number of decimals.
#[must_use]
pub fn format_percent(ratio: Ratio, decimals: u32) -> String {
    let pct = (ratio * Decimal::ONE_HUNDRED).round_dp(decimals);
    format!("{:.*}%", decimals as usize, pct)
}
