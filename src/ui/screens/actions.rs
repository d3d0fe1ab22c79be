use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{action_title, format_ts, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.actions.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No actions yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Log one with :bjj, :pilates, :save <amount>, or :read <isbn>",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Recent actions (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["When", "Entry", "Note"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .actions
        .iter()
        .enumerate()
        .skip(app.action_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, action)| {
            let style = if i == app.action_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let note = action.note.as_deref().unwrap_or("");

            Row::new(vec![
                Cell::from(format_ts(&action.ts)),
                Cell::from(truncate(&action_title(action, &app.currency), 52)),
                Cell::from(Span::styled(truncate(note, 24), theme::dim_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(17),
        Constraint::Min(30),
        Constraint::Length(24),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Recent actions ({}) ", app.actions.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
