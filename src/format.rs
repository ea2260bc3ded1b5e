//! Display formatting for snapshot fields
//!
//! All output uses en-US conventions: `,` thousands separator and `.` decimal
//! point.

use crate::types::{ChangeTone, PriceSnapshot};

/// Magnitude tiers checked in descending order; the first match wins
const MAGNITUDE_TIERS: &[(f64, &str)] = &[(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Inserts `,` separators into the integer part of an already formatted number.
///
/// Accepts an optional leading `-` and an optional fractional part.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Formats a USD amount with exactly two fraction digits, e.g. `$114,000.00`
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{}${}", sign, group_thousands(&fixed))
}

/// Formats a large USD magnitude with a `K`/`M`/`B`/`T` suffix
///
/// Rounding at a tier boundary is not promoted to the next tier, so
/// `999.995e9` renders as `$1000.00B`.
pub fn format_large_number(num: f64) -> String {
    for (threshold, suffix) in MAGNITUDE_TIERS {
        if num >= *threshold {
            return format!("${:.2}{}", num / threshold, suffix);
        }
    }
    format!("${:.2}", num)
}

/// Formats a quantity with thousands separators and no fraction digits
pub fn format_grouped_integer(num: f64) -> String {
    let rounded = format!("{:.0}", num);
    let rounded = if rounded == "-0" { "0".to_string() } else { rounded };
    group_thousands(&rounded)
}

/// Formats the circulating supply followed by the ticker, e.g. `19,900,000 BTC`
pub fn format_supply(supply: f64, ticker: &str) -> String {
    format!("{} {}", format_grouped_integer(supply), ticker)
}

/// Formats a percentage change with two fraction digits and its tone
pub fn format_change(change: f64) -> (String, ChangeTone) {
    (format!("{:.2}%", change), ChangeTone::for_change(change))
}

/// Text for every snapshot-derived slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSnapshot {
    pub price: String,
    pub change: String,
    pub change_tone: ChangeTone,
    pub market_cap: String,
    pub volume: String,
    pub circulating_supply: String,
    pub ath: String,
    pub atl: String,
}

impl RenderedSnapshot {
    /// Formats every field of a snapshot
    pub fn new(snapshot: &PriceSnapshot, ticker: &str) -> Self {
        let (change, change_tone) = format_change(snapshot.price_change_24h);

        Self {
            price: format_currency(snapshot.price_usd),
            change,
            change_tone,
            market_cap: format_large_number(snapshot.market_cap),
            volume: format_large_number(snapshot.volume_24h),
            circulating_supply: format_supply(snapshot.circulating_supply, ticker),
            ath: format_currency(snapshot.ath),
            atl: format_currency(snapshot.atl),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567.89"), "1,234,567.89");
        assert_eq!(group_thousands("-123456"), "-123,456");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(114000.0), "$114,000.00");
        assert_eq!(format_currency(67.81), "$67.81");
        assert_eq!(format_currency(0.5), "$0.50");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-1.5), "-$1.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_magnitude_thresholds_use_their_tier() {
        assert_eq!(format_large_number(1e3), "$1.00K");
        assert_eq!(format_large_number(1e6), "$1.00M");
        assert_eq!(format_large_number(1e9), "$1.00B");
        assert_eq!(format_large_number(1e12), "$1.00T");
    }

    #[test]
    fn test_format_large_number() {
        assert_eq!(format_large_number(1_234_500_000_000.0), "$1.23T");
        assert_eq!(format_large_number(950.0), "$950.00");
        assert_eq!(format_large_number(45_600_000_000.0), "$45.60B");
        assert_eq!(format_large_number(0.0), "$0.00");
    }

    #[test]
    fn test_boundary_rounding_is_not_promoted() {
        assert_eq!(format_large_number(999.995e9), "$1000.00B");
        assert_eq!(format_large_number(999_999.0), "$1000.00K");
    }

    #[test]
    fn test_format_supply() {
        assert_eq!(format_supply(19_900_000.0, "BTC"), "19,900,000 BTC");
        assert_eq!(format_supply(19_912_345.6, "BTC"), "19,912,346 BTC");
        assert_eq!(format_supply(0.0, "ETH"), "0 ETH");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(
            format_change(-3.25),
            ("-3.25%".to_string(), ChangeTone::Negative)
        );
        assert_eq!(format_change(0.0), ("0.00%".to_string(), ChangeTone::Positive));
        assert_eq!(
            format_change(2.456),
            ("2.46%".to_string(), ChangeTone::Positive)
        );
    }

    #[test]
    fn test_rendered_snapshot() {
        let snapshot = PriceSnapshot {
            price_usd: 114_250.0,
            price_change_24h: -3.25,
            market_cap: 1_234_500_000_000.0,
            volume_24h: 950.0,
            circulating_supply: 19_900_000.0,
            ath: 123_000.0,
            atl: 67.81,
            max_supply: None,
            ath_date: None,
            atl_date: None,
            last_updated: None,
        };

        let rendered = RenderedSnapshot::new(&snapshot, "BTC");
        assert_eq!(rendered.price, "$114,250.00");
        assert_eq!(rendered.change, "-3.25%");
        assert_eq!(rendered.change_tone, ChangeTone::Negative);
        assert_eq!(rendered.market_cap, "$1.23T");
        assert_eq!(rendered.volume, "$950.00");
        assert_eq!(rendered.circulating_supply, "19,900,000 BTC");
        assert_eq!(rendered.ath, "$123,000.00");
        assert_eq!(rendered.atl, "$67.81");
    }
}
