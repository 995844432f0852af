//! Display formatting helpers.
//!
//! Pure functions; locale inputs come from the caller so the same
//! environment snapshot drives every output of a firing.

use chrono::{TimeZone, Utc};

/// Format an amount in a currency for display: `currency(10.0, "USD",
/// true)` is `"$10.00"`. When `omit_us_currency_code` is false, USD is
/// disambiguated as `"US$ 10.00"` for non-US audiences. Unknown currency
/// codes fall back to `"<CODE> <amount>"`.
pub fn currency(amount: f64, code: &str, omit_us_currency_code: bool) -> String {
    let formatted = two_decimals(amount);
    match code {
        "USD" if omit_us_currency_code => format!("${formatted}"),
        "USD" => format!("US$ {formatted}"),
        "EUR" => format!("\u{20ac}{formatted}"),
        "GBP" => format!("\u{a3}{formatted}"),
        _ => format!("{code} {formatted}"),
    }
}

/// Group an integer with thousands separators: `1234` → `"1,234"`.
pub fn whole_number(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Long-style date for a UTC timestamp in seconds: `"March 15, 2026"`.
pub fn date_long(seconds_utc: i64) -> String {
    match Utc.timestamp_opt(seconds_utc, 0).single() {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => String::new(),
    }
}

fn two_decimals(amount: f64) -> String {
    let raw = format!("{amount:.2}");
    match raw.split_once('.') {
        Some((integer, fraction)) => {
            let negative = integer.starts_with('-');
            let digits = integer.trim_start_matches('-');
            let grouped = whole_number(digits.parse::<u64>().unwrap_or(0));
            if negative {
                format!("-{grouped}.{fraction}")
            } else {
                format!("{grouped}.{fraction}")
            }
        }
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_omits_the_country_prefix_when_asked() {
        assert_eq!(currency(10.0, "USD", true), "$10.00");
        assert_eq!(currency(10.0, "USD", false), "US$ 10.00");
    }

    #[test]
    fn known_symbols_and_fallback() {
        assert_eq!(currency(25.5, "EUR", true), "\u{20ac}25.50");
        assert_eq!(currency(3.0, "GBP", true), "\u{a3}3.00");
        assert_eq!(currency(99.0, "SEK", true), "SEK 99.00");
    }

    #[test]
    fn large_amounts_are_grouped() {
        assert_eq!(currency(1234567.89, "USD", true), "$1,234,567.89");
        assert_eq!(whole_number(1_234), "1,234");
        assert_eq!(whole_number(999), "999");
        assert_eq!(whole_number(1_000_000), "1,000,000");
    }

    #[test]
    fn long_dates_render_month_day_year() {
        // 2026-03-15T00:00:00Z
        assert_eq!(date_long(1_773_532_800), "March 15, 2026");
    }
}
