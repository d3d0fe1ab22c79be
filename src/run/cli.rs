use anyhow::Result;
use chrono::Datelike;

use crate::api::{Client, RECENT_ACTIONS_LIMIT};
use crate::config::Config;
use crate::export;
use crate::input;
use crate::models::{ActionType, GoalKind, NewAction};
use crate::progress;
use crate::ui::util::{action_title, format_money_cents, format_ts, goal_title, goal_value, pace_hint};

pub(crate) fn as_cli(args: &[String], api: &Client, config: &Config) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], api, config),
        "goals" => cli_goals(&args[2..], api, config),
        "actions" => cli_actions(&args[2..], api, config),
        "log" => cli_log(&args[2..], api),
        "goal" => cli_goal(&args[2..], api),
        "token" => cli_token(&args[2..], api),
        "export" => cli_export(&args[2..], api),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("goaltui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("GoalTUI — terminal client for a year-goals tracker API");
    println!();
    println!("Usage: goaltui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary [year]                Print the year's stats");
    println!("  goals [year]                  List goals with progress and pace");
    println!("  actions [year]                List recent actions");
    println!("  log bjj|pilates [YYYY-MM-DD]  Log a session (default: today)");
    println!("  log save <amount>             Log money saved (e.g. 25.50)");
    println!("  log read <isbn>               Log a finished book");
    println!("    --year <year>               Year to log under (save/read only)");
    println!("  goal <kind> <target>          Create a goal (bjj, pilates, money, books)");
    println!("  goal <free text>              Create a free-text goal");
    println!("    --year <year>               Year the goal belongs to");
    println!("  token set <value>             Store the admin token");
    println!("  token clear                   Forget the admin token");
    println!("  export [path]                 Export recent actions to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

/// `--year` flag, validated; `None` when absent.
fn year_flag(args: &[String]) -> Result<Option<i32>> {
    if let Some(pair) = args.windows(2).find(|pair| pair[0] == "--year") {
        let year = input::parse_year(&pair[1])
            .ok_or_else(|| anyhow::anyhow!("Invalid year: {}", pair[1]))?;
        return Ok(Some(year));
    }
    Ok(None)
}

/// First bare positional parsed as a year, else the current year.
fn year_positional(args: &[String]) -> Result<i32> {
    if let Some(flag) = year_flag(args)? {
        return Ok(flag);
    }
    if let Some(raw) = args.first().filter(|arg| !arg.starts_with('-')) {
        return input::parse_year(raw).ok_or_else(|| anyhow::anyhow!("Invalid year: {raw}"));
    }
    Ok(chrono::Local::now().year())
}

fn cli_summary(args: &[String], api: &Client, config: &Config) -> Result<()> {
    let year = year_positional(args)?;
    let stats = api.stats(year)?;

    println!("GoalTUI — {year}");
    println!("{}", "─".repeat(40));
    println!("  BJJ sessions:      {}", stats.bjj_count);
    println!("  Pilates sessions:  {}", stats.pilates_count);
    println!(
        "  Saved:             {}",
        format_money_cents(stats.saved_cents_total, &config.currency)
    );
    println!(
        "  Books finished:    {} ({} logs)",
        stats.read_books_total, stats.read_count
    );
    if let Some(updated) = stats.updated_at.as_deref() {
        println!("  Updated:           {}", format_ts(updated));
    }

    Ok(())
}

fn cli_goals(args: &[String], api: &Client, config: &Config) -> Result<()> {
    let year = year_positional(args)?;
    // Progress needs the stats counters alongside the goals.
    let data = api.refresh_all(year)?;

    if data.goals.is_empty() {
        println!("No goals for {year}");
        return Ok(());
    }

    for goal in &data.goals {
        let title = goal_title(goal, &config.currency);
        println!("  [{:<5}] {title}", goal.status.as_str());

        let target = goal.target.unwrap_or(0);
        if let Some(value) = goal.progress_in(&data.stats) {
            if let Some(pct) = progress::progress_percent(value, target) {
                println!(
                    "          {} / {}  {pct}%",
                    goal_value(goal, value, &config.currency),
                    goal_value(goal, target, &config.currency)
                );
            }
            if let Some(pace) = progress::pace_now(year, target, value) {
                println!("          {}", pace_hint(goal, &pace, &config.currency));
            }
        }
    }

    Ok(())
}

fn cli_actions(args: &[String], api: &Client, config: &Config) -> Result<()> {
    let year = year_positional(args)?;
    let actions = api.actions(year, RECENT_ACTIONS_LIMIT)?;

    if actions.is_empty() {
        println!("No actions for {year}");
        return Ok(());
    }

    for action in &actions {
        let note = action
            .note
            .as_deref()
            .map(|note| format!("  ({note})"))
            .unwrap_or_default();
        println!(
            "  {}  {}{note}",
            format_ts(&action.ts),
            action_title(action, &config.currency)
        );
    }

    Ok(())
}

fn cli_log(args: &[String], api: &Client) -> Result<()> {
    let Some(kind) = args.first() else {
        anyhow::bail!("Usage: goaltui log <bjj|pilates|save|read> ...");
    };

    match ActionType::parse(kind) {
        Some(session @ (ActionType::Bjj | ActionType::Pilates)) => {
            let date = match args.get(1).filter(|arg| !arg.starts_with('-')) {
                Some(raw) => input::parse_entry_date(raw)
                    .ok_or_else(|| anyhow::anyhow!("Invalid date (use YYYY-MM-DD): {raw}"))?,
                None => chrono::Local::now().date_naive(),
            };
            let ts = input::entry_timestamp(date);
            let action = if session == ActionType::Bjj {
                NewAction::Bjj { ts }
            } else {
                NewAction::Pilates { ts }
            };
            // Sessions always count under the date's year.
            api.log_action(date.year(), action)?;
        }
        Some(ActionType::Save) => {
            let raw = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("Usage: goaltui log save <amount>"))?;
            let amount_cents = input::parse_amount_cents(raw)
                .ok_or_else(|| anyhow::anyhow!("Invalid amount: {raw}"))?;
            let year = year_flag(&args[1..])?.unwrap_or_else(|| chrono::Local::now().year());
            api.log_action(year, NewAction::Save { amount_cents })?;
        }
        Some(ActionType::Read) => {
            let raw = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("Usage: goaltui log read <isbn>"))?;
            let isbn = input::normalize_isbn(raw)
                .ok_or_else(|| anyhow::anyhow!("Invalid ISBN: {raw}"))?;
            let year = year_flag(&args[1..])?.unwrap_or_else(|| chrono::Local::now().year());
            api.log_action(year, NewAction::Read { isbn })?;
        }
        None => anyhow::bail!("Unknown action type: {kind} (use bjj, pilates, save, read)"),
    }

    println!("Recorded.");
    Ok(())
}

fn cli_goal(args: &[String], api: &Client) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: goaltui goal <kind> <target> [--year <year>]");
    }

    let year = year_flag(args)?.unwrap_or_else(|| chrono::Local::now().year());
    let positional: Vec<&String> = args
        .iter()
        .take_while(|arg| !arg.starts_with("--"))
        .collect();

    if let Some(kind) = positional.first().and_then(|raw| GoalKind::parse(raw.as_str())) {
        let raw_target = positional
            .get(1)
            .ok_or_else(|| anyhow::anyhow!("Target is required"))?;
        let target = input::parse_goal_target(kind, raw_target.as_str()).ok_or_else(|| {
            if kind.is_money() {
                anyhow::anyhow!("Target must be > 0")
            } else {
                anyhow::anyhow!("Target must be a positive integer")
            }
        })?;
        api.create_goal(year, Some(kind), None, Some(target))?;
    } else {
        let title = positional
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if title.is_empty() {
            anyhow::bail!("Usage: goaltui goal <kind> <target> [--year <year>]");
        }
        api.create_goal(year, None, Some(&title), None)?;
    }

    println!("Goal created for {year}.");
    Ok(())
}

fn cli_token(args: &[String], api: &Client) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("set") => {
            let token = args
                .get(1)
                .map(|raw| raw.trim())
                .filter(|token| !token.is_empty())
                .ok_or_else(|| anyhow::anyhow!("Usage: goaltui token set <value>"))?;
            api.tokens().set(token)?;
            println!("Token stored.");
        }
        Some("clear") => {
            api.tokens().clear()?;
            println!("Token cleared.");
        }
        Some("status") | None => {
            if api.tokens().get().is_some() {
                println!("A token is stored.");
            } else {
                println!("No token stored.");
            }
        }
        Some(other) => anyhow::bail!("Unknown token command: {other} (use set, clear, status)"),
    }
    Ok(())
}

fn cli_export(args: &[String], api: &Client) -> Result<()> {
    let year = year_flag(args)?.unwrap_or_else(|| chrono::Local::now().year());
    let output_path = args
        .first()
        .filter(|arg| !arg.starts_with('-'))
        .map(|arg| shellexpand(arg))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/goaltui-actions-{year}.csv")
        });

    let actions = api.actions(year, RECENT_ACTIONS_LIMIT)?;
    let count = export::actions_to_csv(std::path::Path::new(&output_path), &actions)?;
    if count == 0 {
        println!("No actions for {year}");
    } else {
        println!("Exported {count} actions to {output_path}");
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
