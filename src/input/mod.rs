use chrono::{Datelike, NaiveDate};
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::models::GoalKind;

/// Years the backend accepts.
pub(crate) const YEAR_MIN: i32 = 1970;
pub(crate) const YEAR_MAX: i32 = 3000;

pub(crate) fn parse_year(value: &str) -> Option<i32> {
    let year: i32 = value.trim().parse().ok()?;
    if (YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Some(year);
    }
    None
}

/// Strict `YYYY-MM-DD` entry date. Chrono rejects impossible calendar dates
/// (2024-02-30), which is exactly the guard we want before any network call.
pub(crate) fn parse_entry_date(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()?;
    if (YEAR_MIN..=YEAR_MAX).contains(&date.year()) {
        return Some(date);
    }
    None
}

/// Midday local timestamp for a logged session, so timezone conversion on
/// display cannot shift the date.
pub(crate) fn entry_timestamp(date: NaiveDate) -> String {
    format!("{}T12:00:00", date.format("%Y-%m-%d"))
}

/// Amount in currency units ("25.50", "1,234.56") to non-negative integer
/// cents, rounding half away from zero.
pub(crate) fn parse_amount_cents(raw: &str) -> Option<i64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    let amount = Decimal::from_str(&cleaned).ok()?;
    if amount.is_sign_negative() {
        return None;
    }
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

pub(crate) fn parse_count(raw: &str) -> Option<i64> {
    let count: i64 = raw.trim().parse().ok()?;
    if count > 0 {
        return Some(count);
    }
    None
}

/// Goal target entry: money kinds take currency units and become cents,
/// count kinds take a positive integer.
pub(crate) fn parse_goal_target(kind: GoalKind, raw: &str) -> Option<i64> {
    if kind.is_money() {
        parse_amount_cents(raw).filter(|cents| *cents > 0)
    } else {
        parse_count(raw)
    }
}

/// ISBN-10/ISBN-13 normalization matching the backend: uppercase, strip
/// hyphens and spaces, then check the digit shape (a trailing X is only
/// legal as an ISBN-10 check digit).
pub(crate) fn normalize_isbn(raw: &str) -> Option<String> {
    let s = raw.trim().to_uppercase().replace(['-', ' '], "");
    if s.is_empty() {
        return None;
    }
    let shape = Regex::new("^[0-9X]+$").ok()?;
    if !shape.is_match(&s) {
        return None;
    }
    if s.len() == 13 && s.bytes().all(|b| b.is_ascii_digit()) {
        return Some(s);
    }
    if s.len() == 10 {
        let (head, check) = s.split_at(9);
        if head.bytes().all(|b| b.is_ascii_digit()) && (check == "X" || check.bytes().all(|b| b.is_ascii_digit())) {
            return Some(s);
        }
    }
    None
}

#[cfg(test)]
mod tests;
