#![allow(clippy::unwrap_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::*;
use crate::config::Config;
use crate::models::{ActionType, GoalKind, GoalStatus, NewAction};
use crate::token::TokenStore;

// ── Stub backend ──────────────────────────────────────────────
//
// An in-memory stand-in for the real backend, implementing the same routes,
// auth header, response envelopes, and error bodies. Each test gets a fresh
// one on its own port.

#[derive(Default)]
struct StubState {
    /// Expected x-admin-token; None disables auth.
    token: Option<String>,
    stats: Value,
    goals: Vec<Value>,
    actions: Vec<Value>,
    next_goal_id: u32,
    /// Force /stats to fail with a JSON error body.
    fail_stats_json: bool,
    /// Force /stats to fail with a non-JSON body.
    fail_stats_plain: bool,
    /// Last `year` query value seen by /stats.
    last_year: Option<String>,
}

type Shared = Arc<Mutex<StubState>>;

fn authorized(state: &StubState, headers: &HeaderMap) -> bool {
    match &state.token {
        None => true,
        Some(expected) => {
            headers
                .get("x-admin-token")
                .and_then(|value| value.to_str().ok())
                == Some(expected.as_str())
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "unauthorized" })),
    )
        .into_response()
}

fn bump(stats: &mut Value, key: &str, by: i64) {
    if !stats.is_object() {
        *stats = json!({});
    }
    let current = stats.get(key).and_then(Value::as_i64).unwrap_or(0);
    stats[key] = json!(current + by);
}

async fn stub_get_stats(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut st = state.lock().unwrap();
    st.last_year = query.get("year").cloned();
    if !authorized(&st, &headers) {
        return unauthorized();
    }
    if st.fail_stats_plain {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    if st.fail_stats_json {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "backend_down" })),
        )
            .into_response();
    }
    let stats = if st.stats.is_object() {
        st.stats.clone()
    } else {
        json!({})
    };
    (StatusCode::OK, Json(json!({ "stats": stats }))).into_response()
}

async fn stub_get_goals(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let st = state.lock().unwrap();
    if !authorized(&st, &headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({ "goals": st.goals }))).into_response()
}

async fn stub_post_goal(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut st = state.lock().unwrap();
    if !authorized(&st, &headers) {
        return unauthorized();
    }
    let kind = body.get("kind").and_then(Value::as_str);
    let target = body.get("target").and_then(Value::as_i64);
    if kind.is_some() && !target.is_some_and(|t| t > 0) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "target must be a positive integer" })),
        )
            .into_response();
    }
    st.next_goal_id += 1;
    let goal = json!({
        "id": format!("g{}", st.next_goal_id),
        "year": body.get("year").cloned().unwrap_or(Value::Null),
        "title": body.get("title").and_then(Value::as_str).unwrap_or(kind.unwrap_or("")),
        "kind": kind,
        "status": "todo",
        "target": target,
    });
    st.goals.push(goal.clone());
    (StatusCode::CREATED, Json(json!({ "goal": goal }))).into_response()
}

async fn stub_patch_goal(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut st = state.lock().unwrap();
    if !authorized(&st, &headers) {
        return unauthorized();
    }
    let patch = body.get("patch").cloned().unwrap_or_else(|| json!({}));
    for goal in &mut st.goals {
        if goal.get("id").and_then(Value::as_str) == Some(id.as_str()) {
            for key in ["status", "title", "kind", "target"] {
                if let Some(value) = patch.get(key) {
                    goal[key] = value.clone();
                }
            }
            return (StatusCode::OK, Json(json!({ "goal": goal.clone() }))).into_response();
        }
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "goal_not_found" })),
    )
        .into_response()
}

async fn stub_delete_goal(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut st = state.lock().unwrap();
    if !authorized(&st, &headers) {
        return unauthorized();
    }
    st.goals
        .retain(|goal| goal.get("id").and_then(Value::as_str) != Some(id.as_str()));
    StatusCode::NO_CONTENT.into_response()
}

async fn stub_get_actions(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let st = state.lock().unwrap();
    if !authorized(&st, &headers) {
        return unauthorized();
    }
    // Newest first, as the backend returns them.
    let newest_first: Vec<Value> = st.actions.iter().rev().cloned().collect();
    (StatusCode::OK, Json(json!({ "actions": newest_first }))).into_response()
}

async fn stub_post_action(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut st = state.lock().unwrap();
    if !authorized(&st, &headers) {
        return unauthorized();
    }
    let kind = body.get("type").and_then(Value::as_str).unwrap_or("");
    match kind {
        "BJJ" => bump(&mut st.stats, "bjjCount", 1),
        "PILATES" => bump(&mut st.stats, "pilatesCount", 1),
        "SAVE" => {
            let cents = body.get("amountCents").and_then(Value::as_i64).unwrap_or(0);
            bump(&mut st.stats, "savedCentsTotal", cents);
        }
        "READ" => {
            bump(&mut st.stats, "readBooksTotal", 1);
            bump(&mut st.stats, "readCount", 1);
        }
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "type must be BJJ|PILATES|SAVE|READ" })),
            )
                .into_response();
        }
    }
    let mut action = body.clone();
    if action.get("ts").is_none() {
        action["ts"] = json!("2026-01-01T00:00:00+00:00");
    }
    st.actions.push(action.clone());
    (StatusCode::CREATED, Json(json!({ "action": action }))).into_response()
}

fn stub_router(state: Shared) -> Router {
    Router::new()
        .route("/stats", get(stub_get_stats))
        .route("/goals", get(stub_get_goals).post(stub_post_goal))
        .route(
            "/goals/:id",
            axum::routing::patch(stub_patch_goal).delete(stub_delete_goal),
        )
        .route("/actions", get(stub_get_actions).post(stub_post_action))
        .with_state(state)
}

/// Serve the stub on a random port from its own thread and runtime,
/// returning the base URL once the listener is bound.
fn spawn_stub(state: Shared) -> String {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, stub_router(state)).await.unwrap();
        });
    });
    format!("http://{}", rx.recv().unwrap())
}

struct Fixture {
    client: Client,
    state: Shared,
    _dir: tempfile::TempDir,
}

fn fixture() -> Fixture {
    fixture_with(StubState::default())
}

fn fixture_with(state: StubState) -> Fixture {
    let state = Arc::new(Mutex::new(state));
    let base_url = spawn_stub(Arc::clone(&state));
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        base_url,
        currency: "USD".into(),
    };
    let client = Client::new(&config, TokenStore::new(dir.path().join("admin-token"))).unwrap();
    Fixture {
        client,
        state,
        _dir: dir,
    }
}

// ── Tests ─────────────────────────────────────────────────────

#[test]
fn test_refresh_joins_all_three_reads() {
    let fx = fixture_with(StubState {
        stats: json!({ "bjjCount": 3, "savedCentsTotal": 5000 }),
        goals: vec![json!({
            "id": "g1", "year": 2026, "title": "BJJ_SESSIONS",
            "kind": "BJJ_SESSIONS", "status": "doing", "target": 100
        })],
        actions: vec![json!({ "year": 2026, "type": "BJJ", "ts": "2026-02-01T12:00:00" })],
        ..StubState::default()
    });

    let data = fx.client.refresh_all(2026).unwrap();
    assert_eq!(data.stats.bjj_count, 3);
    assert_eq!(data.stats.saved_cents_total, 5000);
    assert_eq!(data.goals.len(), 1);
    assert_eq!(data.goals[0].kind, Some(GoalKind::BjjSessions));
    assert_eq!(data.actions.len(), 1);
    assert_eq!(data.actions[0].kind, ActionType::Bjj);
}

#[test]
fn test_year_query_is_forwarded() {
    let fx = fixture();
    fx.client.stats(2031).unwrap();
    assert_eq!(
        fx.state.lock().unwrap().last_year.as_deref(),
        Some("2031")
    );
}

#[test]
fn test_token_header_comes_from_the_store() {
    let fx = fixture_with(StubState {
        token: Some("sekret".into()),
        ..StubState::default()
    });

    // No token stored: every read is rejected and the refresh fails.
    let err = fx.client.refresh_all(2026).unwrap_err();
    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "unauthorized");
        }
        other => panic!("expected http error, got {other:?}"),
    }

    // Saving the token unlocks the same client instance.
    fx.client.tokens().set("sekret").unwrap();
    fx.client.refresh_all(2026).unwrap();
}

#[test]
fn test_one_failed_read_fails_the_whole_refresh() {
    let fx = fixture_with(StubState {
        goals: vec![json!({ "id": "g1", "year": 2026, "title": "x" })],
        fail_stats_json: true,
        ..StubState::default()
    });

    // Goals and actions alone are healthy...
    assert_eq!(fx.client.goals(2026).unwrap().len(), 1);
    assert!(fx.client.actions(2026, 30).unwrap().is_empty());

    // ...but the joint refresh surfaces the stats failure, whole.
    let err = fx.client.refresh_all(2026).unwrap_err();
    assert_eq!(err.to_string(), "backend_down");
}

#[test]
fn test_error_field_preferred_over_status() {
    let fx = fixture_with(StubState {
        fail_stats_json: true,
        ..StubState::default()
    });
    let err = fx.client.stats(2026).unwrap_err();
    assert_eq!(err.to_string(), "backend_down");
}

#[test]
fn test_non_json_error_falls_back_to_http_status() {
    let fx = fixture_with(StubState {
        fail_stats_plain: true,
        ..StubState::default()
    });
    let err = fx.client.stats(2026).unwrap_err();
    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "HTTP 500");
        }
        other => panic!("expected http error, got {other:?}"),
    }
}

#[test]
fn test_network_failure_is_its_own_kind() {
    // Nothing listens here; the port comes from a listener we just closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        base_url,
        currency: "USD".into(),
    };
    let client = Client::new(&config, TokenStore::new(dir.path().join("admin-token"))).unwrap();
    match client.stats(2026).unwrap_err() {
        ApiError::Network(_) => {}
        other => panic!("expected network error, got {other:?}"),
    }
}

#[test]
fn test_goal_lifecycle_roundtrip() {
    let fx = fixture();

    fx.client
        .create_goal(2026, Some(GoalKind::BooksFinished), None, Some(12))
        .unwrap();
    let goals = fx.client.goals(2026).unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].kind, Some(GoalKind::BooksFinished));
    assert_eq!(goals[0].target, Some(12));
    assert_eq!(goals[0].status, GoalStatus::Todo);

    let id = goals[0].id.clone();
    fx.client
        .set_goal_status(&id, 2026, GoalStatus::Done)
        .unwrap();
    fx.client.set_goal_title(&id, 2026, "twelve books").unwrap();

    let goals = fx.client.goals(2026).unwrap();
    assert_eq!(goals[0].status, GoalStatus::Done);
    assert_eq!(goals[0].title, "twelve books");
}

#[test]
fn test_delete_goal_handles_204() {
    let fx = fixture();
    fx.client
        .create_goal(2026, Some(GoalKind::BjjSessions), None, Some(100))
        .unwrap();
    let id = fx.client.goals(2026).unwrap()[0].id.clone();

    fx.client.delete_goal(&id, 2026).unwrap();
    assert!(fx.client.goals(2026).unwrap().is_empty());
}

#[test]
fn test_create_goal_validation_error_surfaces_message() {
    let fx = fixture();
    let err = fx
        .client
        .create_goal(2026, Some(GoalKind::BjjSessions), None, None)
        .unwrap_err();
    assert_eq!(err.to_string(), "target must be a positive integer");
}

#[test]
fn test_logged_actions_show_up_in_refresh() {
    let fx = fixture();

    fx.client
        .log_action(
            2026,
            NewAction::Bjj {
                ts: "2026-05-01T12:00:00".into(),
            },
        )
        .unwrap();
    fx.client
        .log_action(2026, NewAction::Save { amount_cents: 2550 })
        .unwrap();

    let data = fx.client.refresh_all(2026).unwrap();
    assert_eq!(data.stats.bjj_count, 1);
    assert_eq!(data.stats.saved_cents_total, 2550);
    assert_eq!(data.actions.len(), 2);
    // Newest first.
    assert_eq!(data.actions[0].kind, ActionType::Save);
    assert_eq!(data.actions[1].kind, ActionType::Bjj);
}

// ── App-level lock behavior over the real client ──────────────

#[test]
fn test_refresh_failure_locks_app_and_keeps_panels() {
    use crate::ui::app::App;

    let fx = fixture_with(StubState {
        stats: json!({ "bjjCount": 7 }),
        goals: vec![json!({ "id": "g1", "year": 2026, "title": "keep me" })],
        actions: vec![json!({ "year": 2026, "type": "PILATES", "ts": "2026-01-02T12:00:00" })],
        ..StubState::default()
    });

    let mut app = App::new(2026, "USD".into(), fx.client.base_url().into(), true);
    app.refresh_all(&fx.client);
    assert!(!app.locked);
    assert_eq!(app.stats.bjj_count, 7);
    assert_eq!(app.goals.len(), 1);
    assert_eq!(app.actions.len(), 1);

    // Any single read failing must lock the UI and leave every panel's
    // data exactly as it was. Goals and actions still succeed server-side;
    // the app must not apply them.
    fx.state.lock().unwrap().fail_stats_json = true;
    app.refresh_all(&fx.client);
    assert!(app.locked);
    assert_eq!(app.auth_error, "backend_down");
    assert_eq!(app.stats.bjj_count, 7);
    assert_eq!(app.goals.len(), 1);
    assert_eq!(app.goals[0].title, "keep me");
    assert_eq!(app.actions.len(), 1);

    // Recovery: the backend heals, the next refresh unlocks.
    fx.state.lock().unwrap().fail_stats_json = false;
    app.refresh_all(&fx.client);
    assert!(!app.locked);
    assert!(app.auth_error.is_empty());
}
