//! Integration tests for the garden API endpoints.
//!
//! Tests drive the Axum `Router` directly via `tower::ServiceExt` against a
//! real game service running the offline advisor, without a TCP listener.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sprout_core::{GameController, GameHandle, GameService, SimulationConfig, StubAdvisor};
use sprout_observer::router::build_router;
use sprout_observer::state::AppState;
use tower::ServiceExt;

fn start_game() -> GameHandle {
    let config = SimulationConfig::default();
    let controller = GameController::new(&config, Arc::new(StubAdvisor::new()));
    let (handle, _task) = GameService::spawn(controller);
    handle
}

fn router_for(handle: &GameHandle) -> Router {
    build_router(Arc::new(AppState::new(handle.clone())))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(router: Router, path: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn post(router: Router, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = body.map_or_else(
        || Request::post(path).body(Body::empty()).unwrap(),
        |json| {
            Request::post(path)
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap()
        },
    );
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// =========================================================================
// Reads
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let handle = start_game();
    let response = router_for(&handle)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_get_state_is_a_fresh_session() {
    let handle = start_game();
    let (status, json) = get(router_for(&handle), "/api/state").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["day"], 1);
    assert_eq!(json["money"], 100);
    assert_eq!(json["waterSupply"], 200);
    assert_eq!(json["weather"], "Sunny");
    assert_eq!(json["slots"].as_array().map(Vec::len), Some(9));
    assert_eq!(json["slots"][4]["plant"], "Empty");
    assert_eq!(
        json["logs"][0]["message"],
        "Welcome to Urban Sprout! Start by planting seeds."
    );
    assert_eq!(json["logs"][0]["type"], "info");
}

#[tokio::test]
async fn test_get_history_starts_with_one_sample() {
    let handle = start_game();
    let (status, json) = get(router_for(&handle), "/api/history").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!([{"day": 1, "money": 100, "waterSupply": 200}])
    );
}

#[tokio::test]
async fn test_list_plants_excludes_empty() {
    let handle = start_game();
    let (status, json) = get(router_for(&handle), "/api/plants").await;

    assert_eq!(status, StatusCode::OK);
    let plants = json.as_array().cloned().unwrap_or_default();
    assert_eq!(plants.len(), 5);
    assert!(plants.iter().all(|p| p["type"] != "Empty"));
    assert_eq!(json[0]["type"], "Tomato");
    assert_eq!(json[0]["daysToMaturity"], 10);
    assert_eq!(json[4]["cost"], 30);
}

#[tokio::test]
async fn test_list_logs_filters_and_limits() {
    let handle = start_game();
    handle.buy_water().await.unwrap();
    handle.harvest(0).await.unwrap();

    let (_, all) = get(router_for(&handle), "/api/logs").await;
    assert_eq!(all.as_array().map(Vec::len), Some(3));
    assert_eq!(all[0]["message"], "Not ready for harvest yet.");

    let (_, warnings) = get(router_for(&handle), "/api/logs?kind=warning").await;
    assert_eq!(warnings.as_array().map(Vec::len), Some(1));
    assert_eq!(warnings[0]["type"], "warning");

    let (_, newest) = get(router_for(&handle), "/api/logs?limit=1").await;
    assert_eq!(newest.as_array().map(Vec::len), Some(1));
    assert_eq!(newest[0]["message"], "Not ready for harvest yet.");
}

#[tokio::test]
async fn test_unknown_log_kind_is_rejected() {
    let handle = start_game();
    let (status, json) = get(router_for(&handle), "/api/logs?kind=gossip").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().is_some_and(|e| e.starts_with("invalid request")));
}

#[tokio::test]
async fn test_status_tracks_revision() {
    let handle = start_game();
    let (status, before) = get(router_for(&handle), "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before["revision"], 0);
    assert_eq!(before["day"], 1);
    assert!(before["uptimeSeconds"].as_i64().is_some_and(|s| s >= 0));

    handle.buy_water().await.unwrap();
    let (_, after) = get(router_for(&handle), "/api/status").await;
    assert!(after["revision"].as_u64() > before["revision"].as_u64());
}

// =========================================================================
// Intents
// =========================================================================

#[tokio::test]
async fn test_buy_water_returns_post_intent_state() {
    let handle = start_game();
    let (status, json) = post(router_for(&handle), "/api/water/buy", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["money"], 95);
    assert_eq!(json["waterSupply"], 250);
    assert_eq!(json["logs"][0]["message"], "Bought 50L of water.");
}

#[tokio::test]
async fn test_plant_commits_after_fallback_tip() {
    let handle = start_game();
    let mut rx = handle.subscribe();

    let (status, json) = post(
        router_for(&handle),
        "/api/plots/2/plant",
        Some(serde_json::json!({"plant": "Basil"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["logs"][0]["message"], "Consulting advisor regarding Basil...");
    assert_eq!(json["money"], 100);

    let committed = tokio::time::timeout(
        Duration::from_secs(2),
        rx.wait_for(|s| s.state.plot(2).is_some_and(|p| !p.is_empty())),
    )
    .await
    .is_ok_and(|waited| waited.is_ok());
    assert!(committed);

    let (_, state) = get(router_for(&handle), "/api/state").await;
    assert_eq!(state["money"], 95);
    assert_eq!(state["slots"][2]["plant"], "Basil");
    assert_eq!(state["logs"][0]["message"], "Planted Basil.");
    assert_eq!(
        state["logs"][1]["message"],
        "Advisor tip: Great choice! Basil is fun to grow."
    );
}

#[tokio::test]
async fn test_plant_empty_is_bad_request() {
    let handle = start_game();
    let (status, json) = post(
        router_for(&handle),
        "/api/plots/0/plant",
        Some(serde_json::json!({"plant": "Empty"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert_eq!(handle.state().logs.len(), 1);
}

#[tokio::test]
async fn test_unknown_plant_name_is_bad_request() {
    let handle = start_game();
    let (status, json) = post(
        router_for(&handle),
        "/api/plots/0/plant",
        Some(serde_json::json!({"plant": "Cactus"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().is_some_and(|e| e.contains("Cactus")));
    assert_eq!(handle.state().logs.len(), 1);
}

#[tokio::test]
async fn test_missing_plant_body_is_bad_request() {
    let handle = start_game();
    let (status, json) = post(router_for(&handle), "/api/plots/0/plant", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_non_numeric_plot_id_is_bad_request() {
    let handle = start_game();
    let (status, json) = post(router_for(&handle), "/api/plots/first/water", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_unknown_plot_is_not_found() {
    let handle = start_game();
    let (status, json) = post(router_for(&handle), "/api/plots/42/water", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert!(json["error"].as_str().is_some_and(|e| e.contains("42")));
}

#[tokio::test]
async fn test_water_empty_plot_is_a_warning() {
    let handle = start_game();
    let (status, json) = post(router_for(&handle), "/api/plots/0/water", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["waterSupply"], 200);
    assert_eq!(json["logs"][0]["message"], "Nothing planted here.");
    assert_eq!(json["logs"][0]["type"], "warning");
}

#[tokio::test]
async fn test_remove_clears_plot() {
    let handle = start_game();
    let (status, json) = post(router_for(&handle), "/api/plots/3/remove", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["slots"][3]["plant"], "Empty");
    assert_eq!(json["logs"][0]["message"], "Cleared plot.");
}

#[tokio::test]
async fn test_advance_day_records_history() {
    let handle = start_game();
    let (status, json) = post(router_for(&handle), "/api/day/advance", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["day"], 2);

    let (_, history) = get(router_for(&handle), "/api/history").await;
    assert_eq!(history.as_array().map(Vec::len), Some(2));
    assert_eq!(history[1]["day"], 2);
}

#[tokio::test]
async fn test_chat_falls_back_offline() {
    let handle = start_game();
    let (status, json) = post(
        router_for(&handle),
        "/api/advisor/chat",
        Some(serde_json::json!({"question": "When should I water?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["answer"],
        "I'm having trouble connecting to the satellite. Try again later!"
    );
}

#[tokio::test]
async fn test_blank_chat_question_is_rejected() {
    let handle = start_game();
    let (status, json) = post(
        router_for(&handle),
        "/api/advisor/chat",
        Some(serde_json::json!({"question": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}
