use crate::models::{Action, ActionType, Goal, GoalKind};
use crate::progress::{format_rate, Pace};

/// Currency symbol for the configured display currency. Codes without a
/// common symbol fall back to the code itself.
pub(crate) fn currency_symbol(code: &str) -> String {
    match code.to_uppercase().as_str() {
        "USD" | "CAD" | "AUD" => "$".into(),
        "BRL" => "R$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        other => format!("{other} "),
    }
}

/// Format integer cents with thousand separators and 2 decimal places.
/// e.g. `123456789` → `"$1,234,567.89"`
pub(crate) fn format_money_cents(cents: i64, currency: &str) -> String {
    let abs = cents.unsigned_abs();
    let units = (abs / 100).to_string();
    let frac = abs % 100;

    let with_commas: String = units
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let symbol = currency_symbol(currency);
    if cents < 0 {
        format!("-{symbol}{with_commas}.{frac:02}")
    } else {
        format!("{symbol}{with_commas}.{frac:02}")
    }
}

/// Render an ISO timestamp as a local-style `YYYY-MM-DD HH:MM`, falling
/// back to the raw string when it does not parse.
pub(crate) fn format_ts(ts: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(ts) {
        return dt
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    ts.to_string()
}

/// Display title for a goal card, with the target folded in.
pub(crate) fn goal_title(goal: &Goal, currency: &str) -> String {
    let target = goal.target.unwrap_or(0);
    match goal.kind {
        Some(GoalKind::BjjSessions) => format!("BJJ sessions ({target})"),
        Some(GoalKind::PilatesSessions) => format!("Pilates sessions ({target})"),
        Some(GoalKind::MoneySavedCents) => {
            format!("Money saved ({})", format_money_cents(target, currency))
        }
        Some(GoalKind::BooksFinished) => format!("Books finished ({target})"),
        None => {
            if goal.title.is_empty() {
                "Goal".to_string()
            } else {
                goal.title.clone()
            }
        }
    }
}

/// Progress values render as money for money goals, plain counts otherwise.
pub(crate) fn goal_value(goal: &Goal, value: i64, currency: &str) -> String {
    if goal.kind.is_some_and(|kind| kind.is_money()) {
        format_money_cents(value, currency)
    } else {
        value.to_string()
    }
}

/// One-line pace hint under a goal's progress bar.
pub(crate) fn pace_hint(goal: &Goal, pace: &Pace, currency: &str) -> String {
    match pace {
        Pace::AtTarget => "On pace: already at target.".to_string(),
        Pace::YearEnd { remaining } => format!(
            "EOY is here: {} remaining.",
            goal_value(goal, *remaining, currency)
        ),
        Pace::Rate {
            per_day,
            per_week,
            per_month,
            ..
        } => {
            if goal.kind.is_some_and(|kind| kind.is_money()) {
                format!(
                    "To hit by Dec 31: ~{}/week (or ~{}/month)",
                    format_money_cents(per_week.round() as i64, currency),
                    format_money_cents(per_month.round() as i64, currency),
                )
            } else {
                let unit = goal.kind.map(|kind| kind.unit()).unwrap_or("units");
                format!(
                    "To hit by Dec 31: ~{} {unit}/week (≈ {}/day)",
                    format_rate(*per_week),
                    format_rate(*per_day),
                )
            }
        }
    }
}

/// Headline for one entry in the recent-actions list.
pub(crate) fn action_title(action: &Action, currency: &str) -> String {
    match action.kind {
        ActionType::Bjj => "BJJ session".to_string(),
        ActionType::Pilates => "Pilates session".to_string(),
        ActionType::Save => format!(
            "Saved {}",
            format_money_cents(action.amount_cents.unwrap_or(0), currency)
        ),
        ActionType::Read => {
            let mut title = "Finished".to_string();
            if let Some(book) = &action.book_title {
                title.push_str(&format!(" • {book}"));
            }
            if !action.book_authors.is_empty() {
                title.push_str(&format!(" • {}", action.book_authors.join(", ")));
            }
            if let Some(isbn) = &action.isbn {
                title.push_str(&format!(" • ISBN {isbn}"));
            }
            title
        }
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page - 1);
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the top of a list.
pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
