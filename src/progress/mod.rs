use chrono::{Datelike, Local, NaiveDate};

/// Average Gregorian month length, used for the per-month pace estimate.
const AVG_DAYS_PER_MONTH: f64 = 30.4375;

/// Percentage of target reached, rounded and clamped to 0..=100.
/// `None` when the goal has no usable target.
pub(crate) fn progress_percent(progress: i64, target: i64) -> Option<u8> {
    if target <= 0 {
        return None;
    }
    let pct = (progress as f64 / target as f64 * 100.0).round();
    Some(pct.clamp(0.0, 100.0) as u8)
}

/// Days remaining in `year` counting today as one of them, or `None` when
/// `year` is not the current year (there is no meaningful "days left" for a
/// past or future year).
pub(crate) fn days_left_in_year(today: NaiveDate, year: i32) -> Option<i64> {
    if today.year() != year {
        return None;
    }
    let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some(((end - today).num_days() + 1).max(0))
}

/// Pace needed to land a goal by December 31 of the selected year.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Pace {
    /// Progress already meets or exceeds the target.
    AtTarget,
    /// The year has run out with work remaining.
    YearEnd { remaining: i64 },
    /// Required rate for the rest of the year.
    Rate {
        remaining: i64,
        per_day: f64,
        per_week: f64,
        per_month: f64,
    },
}

pub(crate) fn pace_at(today: NaiveDate, year: i32, target: i64, progress: i64) -> Option<Pace> {
    if target <= 0 {
        return None;
    }
    let remaining = (target - progress).max(0);
    if remaining == 0 {
        return Some(Pace::AtTarget);
    }
    let days_left = days_left_in_year(today, year)?;
    if days_left == 0 {
        return Some(Pace::YearEnd { remaining });
    }
    let per_day = remaining as f64 / days_left as f64;
    Some(Pace::Rate {
        remaining,
        per_day,
        per_week: per_day * 7.0,
        per_month: per_day * AVG_DAYS_PER_MONTH,
    })
}

pub(crate) fn pace_now(year: i32, target: i64, progress: i64) -> Option<Pace> {
    pace_at(Local::now().date_naive(), year, target, progress)
}

/// Display rule for count-based rates: values under 1 get two decimals,
/// under 10 one decimal, anything larger rounds up to a whole number.
pub(crate) fn format_rate(rate: f64) -> String {
    if rate < 1.0 {
        format!("{rate:.2}")
    } else if rate < 10.0 {
        format!("{rate:.1}")
    } else {
        format!("{}", rate.ceil() as i64)
    }
}

#[cfg(test)]
mod tests;
