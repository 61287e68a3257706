//! Number formatting helpers shared by views.

use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Groups digits the Indian way: the last three digits, then pairs.
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

/// Formats an amount as whole rupees, e.g. `₹1,20,000` or `-₹12,000`.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("{}₹{}", sign, group_indian(&digits))
}

/// Formats a count with Indian digit grouping, e.g. `12,34,567`.
pub fn format_count(value: u64) -> String {
    group_indian(&value.to_string())
}

/// Parses a decimal the backend may send as a JSON string (`"125000.50"`).
///
/// Blank or malformed values yield `None` rather than an error: summary
/// fields are display-only.
pub fn parse_decimal_lenient(value: &str) -> Option<Decimal> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '₹' | '%' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Percentage `part / whole * 100`, or 0 when `whole` is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    match part
        .checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(percent) => percent.to_f64().unwrap_or(0.0),
        // Out of Decimal range; the float ratio is still meaningful.
        None => match (part.to_f64(), whole.to_f64()) {
            (Some(p), Some(w)) => p / w * 100.0,
            _ => 0.0,
        },
    }
}
