#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::NaiveDate;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── progress_percent ──────────────────────────────────────────

#[test]
fn test_percent_basic() {
    assert_eq!(progress_percent(5, 20), Some(25));
    assert_eq!(progress_percent(0, 20), Some(0));
    assert_eq!(progress_percent(20, 20), Some(100));
}

#[test]
fn test_percent_rounds() {
    assert_eq!(progress_percent(1, 3), Some(33));
    assert_eq!(progress_percent(2, 3), Some(67));
}

#[test]
fn test_percent_clamps_overshoot() {
    assert_eq!(progress_percent(250, 100), Some(100));
    assert_eq!(progress_percent(-5, 100), Some(0));
}

#[test]
fn test_percent_requires_positive_target() {
    assert_eq!(progress_percent(5, 0), None);
    assert_eq!(progress_percent(5, -1), None);
}

// ── days_left_in_year ─────────────────────────────────────────

#[test]
fn test_days_left_counts_today() {
    assert_eq!(days_left_in_year(date(2026, 12, 31), 2026), Some(1));
    assert_eq!(days_left_in_year(date(2026, 12, 30), 2026), Some(2));
    // Non-leap year.
    assert_eq!(days_left_in_year(date(2026, 1, 1), 2026), Some(365));
    // Leap year.
    assert_eq!(days_left_in_year(date(2028, 1, 1), 2028), Some(366));
}

#[test]
fn test_days_left_only_for_current_year() {
    assert_eq!(days_left_in_year(date(2030, 6, 1), 2023), None);
    assert_eq!(days_left_in_year(date(2030, 6, 1), 2031), None);
}

// ── pace_at ───────────────────────────────────────────────────

#[test]
fn test_pace_at_target() {
    assert_eq!(pace_at(date(2026, 6, 1), 2026, 20, 20), Some(Pace::AtTarget));
    assert_eq!(pace_at(date(2026, 6, 1), 2026, 20, 25), Some(Pace::AtTarget));
    // "Already at target" shows even for a non-current year.
    assert_eq!(pace_at(date(2030, 6, 1), 2023, 20, 20), Some(Pace::AtTarget));
}

#[test]
fn test_pace_requires_positive_target() {
    assert_eq!(pace_at(date(2026, 6, 1), 2026, 0, 0), None);
    assert_eq!(pace_at(date(2026, 6, 1), 2026, -3, 0), None);
}

#[test]
fn test_pace_suppressed_for_other_years() {
    // Selecting 2023 when the clock says 2030: no days-left, no hint.
    assert_eq!(pace_at(date(2030, 6, 1), 2023, 20, 5), None);
}

#[test]
fn test_pace_weekly_rate() {
    // Dec 25..=Dec 31 is 7 days; 14 remaining => 2/day, 14/week.
    let pace = pace_at(date(2026, 12, 25), 2026, 14, 0).unwrap();
    match pace {
        Pace::Rate {
            remaining,
            per_day,
            per_week,
            per_month,
        } => {
            assert_eq!(remaining, 14);
            assert!((per_day - 2.0).abs() < 1e-9);
            assert!((per_week - 14.0).abs() < 1e-9);
            assert!((per_month - 2.0 * 30.4375).abs() < 1e-9);
        }
        other => panic!("expected rate, got {other:?}"),
    }
}

#[test]
fn test_pace_partial_progress() {
    // 100 target, 40 done, 10 days left => 6/day, 42/week.
    let pace = pace_at(date(2026, 12, 22), 2026, 100, 40).unwrap();
    match pace {
        Pace::Rate {
            per_day, per_week, ..
        } => {
            assert!((per_day - 6.0).abs() < 1e-9);
            assert!((per_week - 42.0).abs() < 1e-9);
        }
        other => panic!("expected rate, got {other:?}"),
    }
}

// ── format_rate ───────────────────────────────────────────────

#[test]
fn test_format_rate_under_one() {
    assert_eq!(format_rate(0.5), "0.50");
    assert_eq!(format_rate(0.03), "0.03");
}

#[test]
fn test_format_rate_single_digit() {
    assert_eq!(format_rate(1.0), "1.0");
    assert_eq!(format_rate(2.25), "2.2");
    assert_eq!(format_rate(9.99), "10.0");
}

#[test]
fn test_format_rate_rounds_up_large() {
    assert_eq!(format_rate(10.0), "10");
    assert_eq!(format_rate(10.2), "11");
    assert_eq!(format_rate(42.0), "42");
}
