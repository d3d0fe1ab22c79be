use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_money_cents, format_ts};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Counter cards
            Constraint::Min(3),    // Meta panel
        ])
        .split(area);

    render_counter_cards(f, chunks[0], app);
    render_meta(f, chunks[1], app);
}

fn render_counter_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_card(
        f,
        cards[0],
        "BJJ",
        app.stats.bjj_count.to_string(),
        theme::ACCENT,
        Some("sessions".into()),
    );
    render_card(
        f,
        cards[1],
        "Pilates",
        app.stats.pilates_count.to_string(),
        theme::ACCENT,
        Some("sessions".into()),
    );
    render_card(
        f,
        cards[2],
        "Saved",
        format_money_cents(app.stats.saved_cents_total, &app.currency),
        theme::GREEN,
        None,
    );
    render_card(
        f,
        cards[3],
        "Read",
        format!("{} books", app.stats.read_books_total),
        theme::YELLOW,
        Some(format!("{} logs", app.stats.read_count)),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_meta(f: &mut Frame, area: Rect, app: &App) {
    let updated = app
        .stats
        .updated_at
        .as_deref()
        .map(|ts| format!("Updated {}", format_ts(ts)))
        .unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Year {}", app.year),
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(updated, theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Backend: {}", app.api_base),
            theme::dim_style(),
        )),
        Line::from(Span::styled(
            "Log something: :bjj [date] · :pilates [date] · :save <amount> · :read <isbn>",
            theme::dim_style(),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " This year ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(text, area);
}
