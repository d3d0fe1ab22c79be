#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use super::*;

// ── parse_year ────────────────────────────────────────────────

#[test]
fn test_parse_year_range() {
    assert_eq!(parse_year("2026"), Some(2026));
    assert_eq!(parse_year(" 1970 "), Some(1970));
    assert_eq!(parse_year("3000"), Some(3000));
    assert_eq!(parse_year("1969"), None);
    assert_eq!(parse_year("3001"), None);
    assert_eq!(parse_year("soon"), None);
    assert_eq!(parse_year(""), None);
}

// ── parse_entry_date ──────────────────────────────────────────

#[test]
fn test_entry_date_valid() {
    assert_eq!(
        parse_entry_date("2026-05-01"),
        NaiveDate::from_ymd_opt(2026, 5, 1)
    );
    assert_eq!(
        parse_entry_date(" 2028-02-29 "),
        NaiveDate::from_ymd_opt(2028, 2, 29)
    );
}

#[test]
fn test_entry_date_rejects_impossible_dates() {
    // Well-formed but not a real calendar date: must fail before any
    // network call is made.
    assert_eq!(parse_entry_date("2024-02-30"), None);
    assert_eq!(parse_entry_date("2026-02-29"), None);
    assert_eq!(parse_entry_date("2026-13-01"), None);
    assert_eq!(parse_entry_date("2026-00-10"), None);
}

#[test]
fn test_entry_date_rejects_garbage() {
    assert_eq!(parse_entry_date("yesterday"), None);
    assert_eq!(parse_entry_date("2026/05/01"), None);
    assert_eq!(parse_entry_date("1969-12-31"), None);
    assert_eq!(parse_entry_date(""), None);
}

#[test]
fn test_entry_timestamp_is_midday() {
    let date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    assert_eq!(entry_timestamp(date), "2026-05-01T12:00:00");
}

// ── parse_amount_cents ────────────────────────────────────────

#[test]
fn test_amount_basic() {
    assert_eq!(parse_amount_cents("25.50"), Some(2550));
    assert_eq!(parse_amount_cents("0"), Some(0));
    assert_eq!(parse_amount_cents("1,234.56"), Some(123_456));
    assert_eq!(parse_amount_cents(" 10 "), Some(1000));
}

#[test]
fn test_amount_rounds_to_cents() {
    assert_eq!(parse_amount_cents("0.005"), Some(1));
    assert_eq!(parse_amount_cents("1.004"), Some(100));
    assert_eq!(parse_amount_cents("1.006"), Some(101));
}

#[test]
fn test_amount_rejects_negative_and_garbage() {
    assert_eq!(parse_amount_cents("-1"), None);
    assert_eq!(parse_amount_cents("ten"), None);
    assert_eq!(parse_amount_cents(""), None);
    assert_eq!(parse_amount_cents("   "), None);
}

// ── goal targets ──────────────────────────────────────────────

#[test]
fn test_count_target_must_be_positive_integer() {
    assert_eq!(parse_count("100"), Some(100));
    assert_eq!(parse_count("0"), None);
    assert_eq!(parse_count("-5"), None);
    assert_eq!(parse_count("12.5"), None);
}

#[test]
fn test_goal_target_money_in_cents() {
    use crate::models::GoalKind;
    assert_eq!(
        parse_goal_target(GoalKind::MoneySavedCents, "5000"),
        Some(500_000)
    );
    assert_eq!(
        parse_goal_target(GoalKind::MoneySavedCents, "49.99"),
        Some(4999)
    );
    assert_eq!(parse_goal_target(GoalKind::MoneySavedCents, "0"), None);
    assert_eq!(parse_goal_target(GoalKind::BjjSessions, "100"), Some(100));
    assert_eq!(parse_goal_target(GoalKind::BooksFinished, "12.5"), None);
}

// ── normalize_isbn ────────────────────────────────────────────

#[test]
fn test_isbn_13() {
    assert_eq!(
        normalize_isbn("978-0-13-468599-1"),
        Some("9780134685991".to_string())
    );
    assert_eq!(
        normalize_isbn(" 9780134685991 "),
        Some("9780134685991".to_string())
    );
}

#[test]
fn test_isbn_10_with_check_x() {
    assert_eq!(normalize_isbn("0-8044-2957-x"), Some("080442957X".to_string()));
    assert_eq!(normalize_isbn("0306406152"), Some("0306406152".to_string()));
}

#[test]
fn test_isbn_rejects_bad_shapes() {
    assert_eq!(normalize_isbn(""), None);
    assert_eq!(normalize_isbn("abc"), None);
    // X anywhere but the ISBN-10 check digit position.
    assert_eq!(normalize_isbn("X306406152"), None);
    assert_eq!(normalize_isbn("97801346859X1"), None);
    // Wrong lengths.
    assert_eq!(normalize_isbn("12345"), None);
    assert_eq!(normalize_isbn("123456789012"), None);
}
