use serde::{Deserialize, Serialize};

use super::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalKind {
    BjjSessions,
    PilatesSessions,
    MoneySavedCents,
    BooksFinished,
}

impl GoalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BjjSessions => "BJJ_SESSIONS",
            Self::PilatesSessions => "PILATES_SESSIONS",
            Self::MoneySavedCents => "MONEY_SAVED_CENTS",
            Self::BooksFinished => "BOOKS_FINISHED",
        }
    }

    /// Parse a kind from the wire name or a short alias typed at a prompt.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "BJJ_SESSIONS" | "BJJ" => Some(Self::BjjSessions),
            "PILATES_SESSIONS" | "PILATES" => Some(Self::PilatesSessions),
            "MONEY_SAVED_CENTS" | "MONEY" | "SAVED" | "SAVE" => Some(Self::MoneySavedCents),
            "BOOKS_FINISHED" | "BOOKS" | "READ" => Some(Self::BooksFinished),
            _ => None,
        }
    }

    pub fn all() -> &'static [GoalKind] {
        &[
            Self::BjjSessions,
            Self::PilatesSessions,
            Self::MoneySavedCents,
            Self::BooksFinished,
        ]
    }

    pub fn is_money(&self) -> bool {
        matches!(self, Self::MoneySavedCents)
    }

    /// Unit word used in pace hints for count-based kinds.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::BooksFinished => "books",
            _ => "sessions",
        }
    }
}

impl std::fmt::Display for GoalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Some(Self::Todo),
            "doing" => Some(Self::Doing),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One yearly goal as the backend returns it. Structured goals carry a kind
/// and numeric target; legacy goals carry only a free-text title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub year: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub kind: Option<GoalKind>,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub target: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Goal {
    /// The stats counter this goal is measured against, if it has one.
    pub fn progress_in(&self, stats: &Stats) -> Option<i64> {
        match self.kind? {
            GoalKind::BjjSessions => Some(stats.bjj_count),
            GoalKind::PilatesSessions => Some(stats.pilates_count),
            GoalKind::MoneySavedCents => Some(stats.saved_cents_total),
            GoalKind::BooksFinished => Some(stats.read_books_total),
        }
    }
}
