use anyhow::Result;
use chrono::Datelike;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::api::Client;
use crate::config::Config;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(api: &Client, config: &Config) -> Result<()> {
    let year = chrono::Local::now().year();
    // Start unlocked only when a token is already stored; the first refresh
    // decides whether it actually works.
    let locked = api.tokens().get().is_none();
    let mut app = App::new(
        year,
        config.currency.clone(),
        config.base_url.clone(),
        locked,
    );
    app.refresh_all(api);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, api);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api: &Client,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd + 2 borders + 1 header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, api)?,
                InputMode::Command => handle_command_input(key, app, api)?,
                InputMode::Token => handle_token_input(key, app, api)?,
                InputMode::Confirm => handle_confirm_input(key, app, api)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, api: &Client) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Goals,
        KeyCode::Char('3') => app.screen = Screen::Actions,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            app.screen = screens[(idx + 1) % screens.len()];
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            app.screen = screens[prev];
        }
        KeyCode::Char('r') => {
            commands::handle_command("refresh", app, api)?;
        }
        KeyCode::Char('t') => {
            commands::handle_command("token", app, api)?;
        }
        KeyCode::Char('H') => {
            commands::handle_command("prev-year", app, api)?;
        }
        KeyCode::Char('L') => {
            commands::handle_command("next-year", app, api)?;
        }
        KeyCode::Char('D') if app.screen == Screen::Goals => {
            commands::handle_command("delete-goal", app, api)?;
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, api: &Client) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, api)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_token_input(key: event::KeyEvent, app: &mut App, api: &Client) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let token = app.token_input.clone();
            app.token_input.clear();
            app.input_mode = InputMode::Normal;
            commands::save_token(&token, app, api)?;
        }
        KeyCode::Esc => {
            app.token_input.clear();
            app.input_mode = InputMode::Normal;
            app.set_status("Token entry cancelled");
        }
        KeyCode::Backspace => {
            app.token_input.pop();
        }
        KeyCode::Char(c) => {
            app.token_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, api: &Client) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteGoal { id, title } => {
                        let result = api.delete_goal(&id, app.year);
                        commands::apply_mutation(app, api, result, &format!("Deleted: {title}"));
                        if app.goal_index > 0 && app.goal_index >= app.goals.len() {
                            app.goal_index = app.goals.len().saturating_sub(1);
                        }
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Goals => {
            // Goal cards are three lines tall.
            let page = (app.visible_rows / 3).max(1);
            scroll_down(&mut app.goal_index, &mut app.goal_scroll, app.goals.len(), page);
        }
        Screen::Actions => {
            let page = app.visible_rows.max(1);
            scroll_down(
                &mut app.action_index,
                &mut app.action_scroll,
                app.actions.len(),
                page,
            );
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Goals => scroll_up(&mut app.goal_index, &mut app.goal_scroll),
        Screen::Actions => scroll_up(&mut app.action_index, &mut app.action_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Goals => scroll_to_top(&mut app.goal_index, &mut app.goal_scroll),
        Screen::Actions => scroll_to_top(&mut app.action_index, &mut app.action_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Goals => {
            let page = (app.visible_rows / 3).max(1);
            scroll_to_bottom(
                &mut app.goal_index,
                &mut app.goal_scroll,
                app.goals.len(),
                page,
            );
        }
        Screen::Actions => {
            let page = app.visible_rows.max(1);
            scroll_to_bottom(
                &mut app.action_index,
                &mut app.action_scroll,
                app.actions.len(),
                page,
            );
        }
        Screen::Dashboard => {}
    }
}
