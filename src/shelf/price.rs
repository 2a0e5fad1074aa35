//! Price formatting for the single supported locale (en-IN).
//!
//! Indian digit grouping keeps the last three integer digits together and then
//! groups the rest in pairs: `1234567.5` becomes `12,34,567.5`. At most three
//! fraction digits are shown and trailing zeros are dropped.

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

const MAX_FRACTION_DIGITS: usize = 3;

pub fn format_price(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return format!("{}{}", symbol, value);
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let mut out = String::with_capacity(fixed.len() + 8);
    if negative {
        out.push('-');
    }
    out.push_str(symbol);
    out.push_str(&group_indian(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
