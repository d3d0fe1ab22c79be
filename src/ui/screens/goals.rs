use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::GoalStatus;
use crate::progress;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{goal_title, goal_value, pace_hint, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.goals.is_empty() {
        render_empty(f, area);
        return;
    }

    // Goal cards are up to three lines tall.
    let visible = (area.height.saturating_sub(2) as usize / 3).max(1);

    let items: Vec<ListItem> = app
        .goals
        .iter()
        .enumerate()
        .skip(app.goal_scroll)
        .take(visible)
        .map(|(i, goal)| {
            let selected = i == app.goal_index;
            let title_style = if selected {
                theme::selected_style()
            } else {
                Style::default()
                    .fg(theme::TEXT)
                    .add_modifier(Modifier::BOLD)
            };
            let tag_style = match goal.status {
                GoalStatus::Done => theme::done_style(),
                GoalStatus::Doing => theme::doing_style(),
                GoalStatus::Todo => theme::dim_style(),
            };

            let mut lines = vec![Line::from(vec![
                Span::styled(
                    format!("{:<40}", truncate(&goal_title(goal, &app.currency), 40)),
                    title_style,
                ),
                Span::raw(" "),
                Span::styled(format!("[{}]", goal.status), tag_style),
            ])];

            let target = goal.target.unwrap_or(0);
            let value = goal.progress_in(&app.stats);
            if let (Some(value), Some(pct)) = (
                value,
                value.and_then(|v| progress::progress_percent(v, target)),
            ) {
                let ratio = f64::from(pct) / 100.0;
                let color = if pct >= 100 {
                    theme::GREEN
                } else if pct >= 50 {
                    theme::YELLOW
                } else {
                    theme::ACCENT
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        format!(
                            "{} / {} ",
                            goal_value(goal, value, &app.currency),
                            goal_value(goal, target, &app.currency)
                        ),
                        Style::default().fg(color),
                    ),
                    Span::styled(progress_bar(ratio, 20), Style::default().fg(color)),
                    Span::styled(
                        format!(" {pct}%"),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ]));

                if let Some(pace) = progress::pace_now(app.year, target, value) {
                    lines.push(Line::from(Span::styled(
                        pace_hint(goal, &pace, &app.currency),
                        theme::dim_style(),
                    )));
                }
            }

            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Goals for {} ({}) ", app.year, app.goals.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No goals yet for this year",
            theme::dim_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Use :goal <kind> <target> (e.g. :goal bjj 100, :goal money 5000)",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Goals ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
