use crate::api::Client;
use crate::models::{Action, Goal, Stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Goals,
    Actions,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Goals, Self::Actions]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Goals => write!(f, "Goals"),
            Self::Actions => write!(f, "Actions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Token,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Token => write!(f, "TOKEN"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteGoal { id: String, title: String },
}

/// UI state. The auth state machine is two-valued: `locked` shows the
/// token prompt and is entered on explicit lock or on any refresh failure;
/// a successful refresh (or token save followed by one) unlocks.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) token_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) locked: bool,
    pub(crate) auth_error: String,

    pub(crate) year: i32,
    pub(crate) currency: String,
    pub(crate) api_base: String,

    // Panels, replaced wholesale by each successful refresh.
    pub(crate) stats: Stats,
    pub(crate) goals: Vec<Goal>,
    pub(crate) actions: Vec<Action>,

    pub(crate) goal_index: usize,
    pub(crate) goal_scroll: usize,
    pub(crate) action_index: usize,
    pub(crate) action_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(year: i32, currency: String, api_base: String, locked: bool) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            token_input: String::new(),
            status_message: String::new(),
            show_help: false,

            locked,
            auth_error: String::new(),

            year,
            currency,
            api_base,

            stats: Stats::default(),
            goals: Vec::new(),
            actions: Vec::new(),

            goal_index: 0,
            goal_scroll: 0,
            action_index: 0,
            action_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Re-fetch stats, goals, and actions for the selected year. Errors are
    /// absorbed into the lock state rather than propagated: the three reads
    /// land together or not at all, and on failure every panel keeps the
    /// data it already had.
    pub(crate) fn refresh_all(&mut self, api: &Client) {
        self.status_message.clear();
        match api.refresh_all(self.year) {
            Ok(data) => {
                self.stats = data.stats;
                self.goals = data.goals;
                self.actions = data.actions;
                self.locked = false;
                self.auth_error.clear();
                self.clamp_cursors();
            }
            Err(err) => {
                // Most common cause: missing or invalid token. The client
                // cannot tell that apart from any other failure, so every
                // failure shows the token prompt.
                self.locked = true;
                self.auth_error = err.to_string();
            }
        }
    }

    /// Switch the selected year and refresh, mirroring the year picker.
    pub(crate) fn set_year(&mut self, api: &Client, year: i32) {
        if year == self.year {
            return;
        }
        self.year = year;
        self.goal_index = 0;
        self.goal_scroll = 0;
        self.action_index = 0;
        self.action_scroll = 0;
        self.refresh_all(api);
    }

    pub(crate) fn selected_goal(&self) -> Option<&Goal> {
        self.goals.get(self.goal_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn clamp_cursors(&mut self) {
        if self.goal_index >= self.goals.len() {
            self.goal_index = self.goals.len().saturating_sub(1);
            self.goal_scroll = self.goal_scroll.min(self.goal_index);
        }
        if self.action_index >= self.actions.len() {
            self.action_index = self.actions.len().saturating_sub(1);
            self.action_scroll = self.action_scroll.min(self.action_index);
        }
    }
}
