use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::Datelike;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::api::{ApiError, Client};
use crate::input;
use crate::models::{ActionType, GoalKind, GoalStatus, NewAction};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Client) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit GoalTUI", cmd_quit, r);
    register_command!("quit", "Quit GoalTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("g", "Go to Goals", cmd_goals, r);
    register_command!("goals", "Go to Goals", cmd_goals, r);
    register_command!("a", "Go to Actions", cmd_actions, r);
    register_command!("actions", "Go to Actions", cmd_actions, r);
    register_command!("r", "Re-fetch stats, goals, and actions", cmd_refresh, r);
    register_command!("refresh", "Re-fetch stats, goals, and actions", cmd_refresh, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("year", "Select year (e.g. :year 2026)", cmd_year, r);
    register_command!("y", "Select year (e.g. :y 2026)", cmd_year, r);
    register_command!("next-year", "Go to next year", cmd_next_year, r);
    register_command!("prev-year", "Go to previous year", cmd_prev_year, r);
    register_command!(
        "token",
        "Save admin token (:token <value>, or blank to type it hidden)",
        cmd_token,
        r
    );
    register_command!("lock", "Clear the stored token and lock", cmd_lock, r);
    register_command!("bjj", "Log a BJJ session (:bjj [YYYY-MM-DD])", cmd_bjj, r);
    register_command!(
        "pilates",
        "Log a Pilates session (:pilates [YYYY-MM-DD])",
        cmd_pilates,
        r
    );
    register_command!("save", "Log money saved (e.g. :save 25.50)", cmd_save, r);
    register_command!("read", "Log a finished book (e.g. :read 978...)", cmd_read, r);
    register_command!(
        "goal",
        "Create a goal (e.g. :goal bjj 100, :goal money 5000, or free text)",
        cmd_goal,
        r
    );
    register_command!("todo", "Mark selected goal todo", cmd_todo, r);
    register_command!("doing", "Mark selected goal doing", cmd_doing, r);
    register_command!("done", "Mark selected goal done", cmd_done, r);
    register_command!(
        "status",
        "Set selected goal status (:status todo|doing|done)",
        cmd_status,
        r
    );
    register_command!(
        "title",
        "Rename selected goal (e.g. :title Run a marathon)",
        cmd_title,
        r
    );
    register_command!("delete-goal", "Delete selected goal", cmd_delete_goal, r);
    register_command!(
        "export",
        "Export recent actions to CSV (e.g. :export ~/actions.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, api)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Run a write, then re-fetch everything on success (the no-cache,
/// no-optimistic-update rule) or report the error and change nothing.
pub(crate) fn apply_mutation(
    app: &mut App,
    api: &Client,
    result: Result<(), ApiError>,
    ok_message: &str,
) {
    match result {
        Ok(()) => {
            app.refresh_all(api);
            app.set_status(ok_message);
        }
        Err(err) => app.set_status(format!("Error: {err}")),
    }
}

/// Persist a pasted token, then refresh to find out whether it works.
pub(crate) fn save_token(token: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    let token = token.trim();
    if token.is_empty() {
        app.auth_error = "Token is required.".into();
        return Ok(());
    }
    api.tokens().set(token)?;
    app.refresh_all(api);
    if !app.locked {
        app.set_status("Unlocked.");
    }
    Ok(())
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _api: &Client) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _api: &Client) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_goals(_args: &str, app: &mut App, _api: &Client) -> anyhow::Result<()> {
    app.screen = Screen::Goals;
    Ok(())
}

fn cmd_actions(_args: &str, app: &mut App, _api: &Client) -> anyhow::Result<()> {
    app.screen = Screen::Actions;
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    app.refresh_all(api);
    if !app.locked {
        app.set_status("Refreshed.");
    }
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _api: &Client) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_year(args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :year <1970-3000>");
        return Ok(());
    }
    match input::parse_year(args) {
        Some(year) => {
            app.set_year(api, year);
            app.set_status(format!("Year: {year}"));
        }
        None => app.set_status("Invalid year. Use a value between 1970 and 3000"),
    }
    Ok(())
}

fn cmd_next_year(_args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    let year = (app.year + 1).min(input::YEAR_MAX);
    app.set_year(api, year);
    app.set_status(format!("Year: {year}"));
    Ok(())
}

fn cmd_prev_year(_args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    let year = (app.year - 1).max(input::YEAR_MIN);
    app.set_year(api, year);
    app.set_status(format!("Year: {year}"));
    Ok(())
}

fn cmd_token(args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    if args.is_empty() {
        app.input_mode = InputMode::Token;
        app.token_input.clear();
        app.set_status("Type the token and press Enter (Esc to cancel)");
        return Ok(());
    }
    save_token(args, app, api)
}

fn cmd_lock(_args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    api.tokens().clear()?;
    app.locked = true;
    app.auth_error = "Locked. Paste token to continue.".into();
    Ok(())
}

fn cmd_bjj(args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    log_session(ActionType::Bjj, |ts| NewAction::Bjj { ts }, args, app, api)
}

fn cmd_pilates(args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    log_session(
        ActionType::Pilates,
        |ts| NewAction::Pilates { ts },
        args,
        app,
        api,
    )
}

fn log_session(
    kind: ActionType,
    make: impl FnOnce(String) -> NewAction,
    args: &str,
    app: &mut App,
    api: &Client,
) -> anyhow::Result<()> {
    let date = if args.is_empty() {
        // Default the session date to today (local).
        chrono::Local::now().date_naive()
    } else {
        match input::parse_entry_date(args) {
            Some(date) => date,
            None => {
                app.set_status(format!("Pick a valid {kind} date (YYYY-MM-DD)"));
                return Ok(());
            }
        }
    };

    // Count it under the date's year, switching the selected year if needed.
    if date.year() != app.year {
        app.year = date.year();
    }

    let action = make(input::entry_timestamp(date));
    let result = api.log_action(app.year, action);
    apply_mutation(app, api, result, "Recorded.");
    Ok(())
}

fn cmd_save(args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    let Some(amount_cents) = input::parse_amount_cents(args) else {
        app.set_status("Invalid amount");
        return Ok(());
    };
    let result = api.log_action(app.year, NewAction::Save { amount_cents });
    apply_mutation(app, api, result, "Recorded.");
    Ok(())
}

fn cmd_read(args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("ISBN is required.");
        return Ok(());
    }
    let Some(isbn) = input::normalize_isbn(args) else {
        app.set_status("Invalid ISBN (need ISBN-10 or ISBN-13)");
        return Ok(());
    };
    // The backend looks the book up; a bad lookup comes back as its error.
    let result = api.log_action(app.year, NewAction::Read { isbn });
    apply_mutation(app, api, result, "Recorded.");
    Ok(())
}

fn cmd_goal(args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :goal <kind> <target> (kinds: bjj, pilates, money, books) or :goal <free text>");
        return Ok(());
    }

    let mut parts = args.splitn(2, ' ');
    let first = parts.next().unwrap_or("");
    if let Some(kind) = GoalKind::parse(first) {
        let target_raw = parts.next().unwrap_or("").trim();
        if target_raw.is_empty() {
            app.set_status("Target is required.");
            return Ok(());
        }
        let Some(target) = input::parse_goal_target(kind, target_raw) else {
            if kind.is_money() {
                app.set_status("Target must be > 0.");
            } else {
                app.set_status("Target must be a positive integer.");
            }
            return Ok(());
        };
        let result = api.create_goal(app.year, Some(kind), None, Some(target));
        apply_mutation(app, api, result, "Goal created.");
    } else {
        // Legacy free-text goal.
        let result = api.create_goal(app.year, None, Some(args), None);
        apply_mutation(app, api, result, "Goal created.");
    }
    Ok(())
}

fn cmd_todo(_args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    set_selected_goal_status(GoalStatus::Todo, app, api)
}

fn cmd_doing(_args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    set_selected_goal_status(GoalStatus::Doing, app, api)
}

fn cmd_done(_args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    set_selected_goal_status(GoalStatus::Done, app, api)
}

fn cmd_status(args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    match GoalStatus::parse(args) {
        Some(status) => set_selected_goal_status(status, app, api),
        None => {
            app.set_status("Usage: :status <todo|doing|done>");
            Ok(())
        }
    }
}

fn set_selected_goal_status(
    status: GoalStatus,
    app: &mut App,
    api: &Client,
) -> anyhow::Result<()> {
    if app.screen != Screen::Goals || app.goals.is_empty() {
        app.set_status("Navigate to Goals and select one first");
        return Ok(());
    }
    if let Some(goal) = app.selected_goal() {
        let id = goal.id.clone();
        let result = api.set_goal_status(&id, app.year, status);
        apply_mutation(app, api, result, &format!("Status: {status}"));
    }
    Ok(())
}

fn cmd_title(args: &str, app: &mut App, api: &Client) -> anyhow::Result<()> {
    if app.screen != Screen::Goals || app.goals.is_empty() {
        app.set_status("Navigate to Goals and select one first");
        return Ok(());
    }
    if args.is_empty() {
        app.set_status("Usage: :title <new goal title>");
        return Ok(());
    }
    if let Some(goal) = app.selected_goal() {
        let id = goal.id.clone();
        let result = api.set_goal_title(&id, app.year, args);
        apply_mutation(app, api, result, &format!("Renamed goal to: {args}"));
    }
    Ok(())
}

fn cmd_delete_goal(_args: &str, app: &mut App, _api: &Client) -> anyhow::Result<()> {
    if app.screen != Screen::Goals || app.goals.is_empty() {
        app.set_status("Navigate to Goals and select one first");
        return Ok(());
    }

    if let Some(goal) = app.selected_goal() {
        let title = super::util::goal_title(goal, &app.currency);
        let id = goal.id.clone();
        app.confirm_message = format!("Delete goal '{title}'?");
        app.pending_action = Some(PendingAction::DeleteGoal { id, title });
        app.input_mode = InputMode::Confirm;
    }

    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _api: &Client) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/goaltui-actions-{}.csv", app.year)
    } else {
        crate::run::shellexpand(args)
    };

    let count = crate::export::actions_to_csv(std::path::Path::new(&path), &app.actions)?;
    if count == 0 {
        app.set_status("No actions to export");
    } else {
        app.set_status(format!("Exported {count} actions to {path}"));
    }
    Ok(())
}
