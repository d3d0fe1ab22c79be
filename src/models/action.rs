use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionType {
    Bjj,
    Pilates,
    Save,
    Read,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bjj => "BJJ",
            Self::Pilates => "PILATES",
            Self::Save => "SAVE",
            Self::Read => "READ",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "BJJ" => Some(Self::Bjj),
            "PILATES" => Some(Self::Pilates),
            "SAVE" => Some(Self::Save),
            "READ" => Some(Self::Read),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One logged event. Append-only from the client's point of view; the list
/// endpoint returns them newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub year: i32,
    #[serde(rename = "type")]
    pub kind: ActionType,
    pub ts: String,
    #[serde(default)]
    pub amount_cents: Option<i64>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub book_title: Option<String>,
    #[serde(default)]
    pub book_authors: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A new action to post. SAVE and READ actions are timestamped by the
/// backend; sessions carry the user-picked date as a midday timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewAction {
    Bjj { ts: String },
    Pilates { ts: String },
    Save { amount_cents: i64 },
    Read { isbn: String },
}

impl NewAction {
    pub fn kind(&self) -> ActionType {
        match self {
            Self::Bjj { .. } => ActionType::Bjj,
            Self::Pilates { .. } => ActionType::Pilates,
            Self::Save { .. } => ActionType::Save,
            Self::Read { .. } => ActionType::Read,
        }
    }

    pub fn into_body(self, year: i32) -> Value {
        let kind = self.kind();
        match self {
            Self::Bjj { ts } | Self::Pilates { ts } => {
                json!({ "year": year, "type": kind, "ts": ts })
            }
            Self::Save { amount_cents } => {
                json!({ "year": year, "type": kind, "amountCents": amount_cents })
            }
            Self::Read { isbn } => {
                json!({ "year": year, "type": kind, "isbn": isbn })
            }
        }
    }
}
