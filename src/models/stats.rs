use serde::{Deserialize, Serialize};

/// Server-computed aggregates for one year. Every counter defaults to zero
/// so responses from older backend generations (which omit fields they do
/// not track yet) still deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub bjj_count: i64,
    #[serde(default)]
    pub pilates_count: i64,
    #[serde(default)]
    pub saved_cents_total: i64,
    #[serde(default)]
    pub read_books_total: i64,
    #[serde(default)]
    pub read_count: i64,
    #[serde(default)]
    pub updated_at: Option<String>,
}
