//! Formatting utilities used for CLI output.

use crate::models::Currency;
use chrono::NaiveDate;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `2024-03-15` → `March 15, 2024`. Unparseable dates are returned as-is.
pub fn long_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Ratings always show one decimal: `9.5`, `8.0`.
pub fn rating(value: f64) -> String {
    format!("{:.1}", value)
}

/// en-US currency style: `$1,234.50`, `CA$50.00`, `¥3,000`, `CHF 12.00`.
pub fn money(amount: f64, currency: &Currency) -> String {
    let digits = currency.minor_digits();
    let fixed = format!("{:.*}", digits, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut body = group_thousands(int_part);
    if let Some(f) = frac_part {
        body.push('.');
        body.push_str(f);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    match currency.symbol() {
        Some(sym) => format!("{sign}{sym}{body}"),
        None => format!("{sign}{} {body}", currency.code()),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `1 Day` / `12 Days`
pub fn days_label(days: i64) -> String {
    if days == 1 {
        "1 Day".to_string()
    } else {
        format!("{days} Days")
    }
}
