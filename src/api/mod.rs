use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{Action, Goal, GoalStatus, NewAction, Stats};
use crate::token::TokenStore;

/// How many recent actions a refresh asks for.
pub(crate) const RECENT_ACTIONS_LIMIT: u32 = 30;

/// What the client can observe going wrong: the transport failed, the
/// backend answered non-2xx, or a 2xx body did not parse. There is no
/// retry and no finer classification; callers decide what each case means.
#[derive(Debug)]
pub(crate) enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(message) => write!(f, "{message}"),
            // The message already carries the server's `error` field or the
            // "HTTP <status>" fallback.
            Self::Http { message, .. } => write!(f, "{message}"),
            Self::Decode(message) => write!(f, "invalid response: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Everything one refresh brings back. The three reads either all land or
/// the whole refresh fails; there is no partial result.
#[derive(Debug, Clone, Default)]
pub(crate) struct YearData {
    pub(crate) stats: Stats,
    pub(crate) goals: Vec<Goal>,
    pub(crate) actions: Vec<Action>,
}

#[derive(Deserialize)]
struct StatsEnvelope {
    stats: Stats,
}

#[derive(Deserialize)]
struct GoalsEnvelope {
    goals: Vec<Goal>,
}

#[derive(Deserialize)]
struct ActionsEnvelope {
    actions: Vec<Action>,
}

/// HTTP client for the year-goals backend. Owns its tokio runtime and
/// exposes blocking methods so the synchronous event loop never awaits;
/// internally requests run async so a refresh can issue its three reads
/// concurrently and join them.
pub(crate) struct Client {
    http: reqwest::Client,
    rt: tokio::runtime::Runtime,
    base_url: String,
    tokens: TokenStore,
}

impl Client {
    pub(crate) fn new(config: &Config, tokens: TokenStore) -> anyhow::Result<Self> {
        use anyhow::Context;
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        Ok(Self {
            http: reqwest::Client::new(),
            rt,
            base_url: config.base_url.clone(),
            tokens,
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    // ── Reads ────────────────────────────────────────────────

    /// Fetch stats, goals, and recent actions for one year, concurrently
    /// and jointly: if any one call fails the refresh fails whole, so the
    /// caller never renders partial data.
    pub(crate) fn refresh_all(&self, year: i32) -> Result<YearData, ApiError> {
        self.rt.block_on(async {
            let (stats, goals, actions) = tokio::try_join!(
                self.fetch_stats(year),
                self.fetch_goals(year),
                self.fetch_actions(year, RECENT_ACTIONS_LIMIT),
            )?;
            Ok(YearData {
                stats,
                goals,
                actions,
            })
        })
    }

    pub(crate) fn stats(&self, year: i32) -> Result<Stats, ApiError> {
        self.rt.block_on(self.fetch_stats(year))
    }

    pub(crate) fn goals(&self, year: i32) -> Result<Vec<Goal>, ApiError> {
        self.rt.block_on(self.fetch_goals(year))
    }

    pub(crate) fn actions(&self, year: i32, limit: u32) -> Result<Vec<Action>, ApiError> {
        self.rt.block_on(self.fetch_actions(year, limit))
    }

    async fn fetch_stats(&self, year: i32) -> Result<Stats, ApiError> {
        let body = self
            .send(Method::GET, &format!("/stats?year={year}"), None)
            .await?;
        decode::<StatsEnvelope>(body).map(|envelope| envelope.stats)
    }

    async fn fetch_goals(&self, year: i32) -> Result<Vec<Goal>, ApiError> {
        let body = self
            .send(Method::GET, &format!("/goals?year={year}"), None)
            .await?;
        decode::<GoalsEnvelope>(body).map(|envelope| envelope.goals)
    }

    async fn fetch_actions(&self, year: i32, limit: u32) -> Result<Vec<Action>, ApiError> {
        let body = self
            .send(
                Method::GET,
                &format!("/actions?year={year}&limit={limit}"),
                None,
            )
            .await?;
        decode::<ActionsEnvelope>(body).map(|envelope| envelope.actions)
    }

    // ── Writes (callers re-fetch afterwards) ─────────────────

    pub(crate) fn log_action(&self, year: i32, action: NewAction) -> Result<(), ApiError> {
        let body = action.into_body(year);
        self.rt
            .block_on(self.send(Method::POST, "/actions", Some(body)))
            .map(|_| ())
    }

    pub(crate) fn create_goal(
        &self,
        year: i32,
        kind: Option<crate::models::GoalKind>,
        title: Option<&str>,
        target: Option<i64>,
    ) -> Result<(), ApiError> {
        let mut body = serde_json::json!({ "year": year });
        if let Some(kind) = kind {
            body["kind"] = serde_json::json!(kind);
        }
        if let Some(title) = title {
            body["title"] = serde_json::json!(title);
        }
        if let Some(target) = target {
            body["target"] = serde_json::json!(target);
        }
        self.rt
            .block_on(self.send(Method::POST, "/goals", Some(body)))
            .map(|_| ())
    }

    pub(crate) fn set_goal_status(
        &self,
        id: &str,
        year: i32,
        status: GoalStatus,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({ "year": year, "patch": { "status": status } });
        self.rt
            .block_on(self.send(Method::PATCH, &format!("/goals/{id}"), Some(body)))
            .map(|_| ())
    }

    pub(crate) fn set_goal_title(&self, id: &str, year: i32, title: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "year": year, "patch": { "title": title } });
        self.rt
            .block_on(self.send(Method::PATCH, &format!("/goals/{id}"), Some(body)))
            .map(|_| ())
    }

    pub(crate) fn delete_goal(&self, id: &str, year: i32) -> Result<(), ApiError> {
        self.rt
            .block_on(self.send(Method::DELETE, &format!("/goals/{id}?year={year}"), None))
            .map(|_| ())
    }

    // ── The thin wrapper every call goes through ─────────────

    /// One request/response cycle with the backend's conventions: JSON in
    /// and out, `x-admin-token` attached when a token is stored, 204 maps
    /// to null, and a non-2xx response surfaces the body's `error` field
    /// with "HTTP <status>" as the fallback.
    async fn send(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!(%method, %url, "api request");

        let mut request = self
            .http
            .request(method, &url)
            .header("content-type", "application/json");
        if let Some(token) = self.tokens.get() {
            request = request.header("x-admin-token", token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            warn!(%url, "request failed: {err}");
            ApiError::Network(err.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let parsed: Result<Value, _> = serde_json::from_slice(&bytes);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|value| {
                    value
                        .get("error")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            warn!(status = status.as_u16(), %message, "api error");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        parsed.map_err(|err| ApiError::Decode(err.to_string()))
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|err| ApiError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests;
