//! Label formatting helpers shared by the axis and tooltip code.

use chrono::{Datelike, NaiveDate};

/// Group an integer value with thousands separators ("68500" -> "68,500").
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Axis label for a price tick: rounded to the nearest integer and
/// thousands-grouped, matching the journal app's price readouts.
pub fn format_price_label(price: f64) -> String {
    format_thousands(price.round() as i64)
}

/// Axis label for a volume tick, abbreviated in K/M units.
pub fn format_volume(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// X-axis tick label for a bar date: "M/D" without zero padding.
pub fn format_date_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}
