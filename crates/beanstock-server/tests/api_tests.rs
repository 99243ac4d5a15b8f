//! Integration tests for the game API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. Handlers read the real wall clock, so scenarios
//! that need a known shop layout stage it through the engine's
//! snapshot/restore path with the rotation deadline pushed far out.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use beanstock_engine::snapshot::SlotRecord;
use beanstock_engine::{GameSession, SpeciesCatalog};
use beanstock_server::router::build_router;
use beanstock_server::state::AppState;
use beanstock_types::PlantId;
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap()
}

fn make_test_state(coins: u64) -> Arc<AppState> {
    let session = GameSession::new(SpeciesCatalog::standard(), coins, Some(42), unix_now());
    Arc::new(AppState::new(session))
}

/// Replace the session's shop with a single beanstalk slot (base price 120)
/// whose rotation deadline is far enough out that reads during the test
/// never rotate it away.
async fn stage_beanstalk_slot(state: &Arc<AppState>, stock: u32) {
    let mut session = state.session.lock().await;
    let now = unix_now();
    let mut snapshot = session.snapshot(now);
    snapshot.shop.slots = vec![SlotRecord {
        species: "beanstalk".to_owned(),
        stock,
        base_price: 120,
        purchases: 0,
    }];
    snapshot.shop.next_rotation_at = now + 3_600;
    session.restore(&snapshot).unwrap();
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(path: &str, body: &Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

// =========================================================================
// Reads
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let state = make_test_state(120);
    let router = build_router(state);

    let response = router
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
async fn test_get_shop() {
    let state = make_test_state(120);
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/shop").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(!json["slots"].as_array().unwrap().is_empty());
    assert!(json["refresh_at"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_get_pots_starts_all_empty() {
    let state = make_test_state(120);
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/pots").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let pots = json.as_array().unwrap();
    assert_eq!(pots.len(), 12);
    for pot in pots {
        assert_eq!(pot["state"], "empty");
    }
}

#[tokio::test]
async fn test_get_game_state() {
    let state = make_test_state(120);
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/game-state").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["coins"], 120);
    assert!(json["shop"]["slots"].is_array());
    assert_eq!(json["pots"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_save_never_carries_clipper_state() {
    let state = make_test_state(120);
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/save").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let raw = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!raw.contains("clipper"));

    let json: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["coins"], 120);
    assert!(json["pots"].is_array());
}

// =========================================================================
// Purchases
// =========================================================================

#[tokio::test]
async fn test_buy_seed_success() {
    let state = make_test_state(120);
    stage_beanstalk_slot(&state, 3).await;
    let router = build_router(state);

    let response = router
        .oneshot(post_json(
            "/api/buy-seed",
            &json!({"slot_index": 0, "pot_index": 0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["coins"], 0);
    assert_eq!(json["receipt"]["price_paid"], 120);
    assert_eq!(json["receipt"]["species_id"], "beanstalk");
    assert_eq!(json["pots"][0]["state"], "growing");
}

#[tokio::test]
async fn test_declined_buy_is_http_200() {
    let state = make_test_state(120);
    stage_beanstalk_slot(&state, 3).await;
    let router = build_router(state);

    let first = router
        .clone()
        .oneshot(post_json("/api/buy-seed", &json!({"slot_index": 0})))
        .await
        .unwrap();
    assert_eq!(body_to_json(first.into_body()).await["coins"], 0);

    // Second purchase is taxed to 132 against a zero balance.
    let response = router
        .oneshot(post_json("/api/buy-seed", &json!({"slot_index": 0})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], false);
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains("insufficient funds")
    );
    assert_eq!(json["coins"], 0);
}

#[tokio::test]
async fn test_buy_seed_malformed_body_is_client_error() {
    let state = make_test_state(120);
    let router = build_router(state);

    // Missing slot_index entirely.
    let response = router
        .oneshot(post_json("/api/buy-seed", &json!({"pot_index": 3})))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_concurrent_buys_never_oversell() {
    let state = make_test_state(10_000);
    stage_beanstalk_slot(&state, 3).await;
    let router = build_router(Arc::clone(&state));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let router = router.clone();
        handles.push(tokio::spawn(async move {
            let response = router
                .oneshot(post_json("/api/buy-seed", &json!({"slot_index": 0})))
                .await
                .unwrap();
            body_to_json(response.into_body()).await["success"] == true
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }

    // Exactly the staged stock sells; the rest decline on stock, and the
    // balance reflects the taxed prices 120 + 132 + 150.
    assert_eq!(successes, 3);
    let session = state.session.lock().await;
    assert_eq!(session.shop().slot(0).unwrap().stock, 0);
    assert_eq!(session.coins(), 10_000 - 402);
}

// =========================================================================
// Burning and planting
// =========================================================================

#[tokio::test]
async fn test_burn_plant_roundtrip() {
    let state = make_test_state(120);
    stage_beanstalk_slot(&state, 1).await;
    let router = build_router(state);

    router
        .clone()
        .oneshot(post_json(
            "/api/buy-seed",
            &json!({"slot_index": 0, "pot_index": 4}),
        ))
        .await
        .unwrap();

    let response = router
        .clone()
        .oneshot(post_json("/api/burn-plant", &json!({"pot_index": 4})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["pots"][4]["state"], "empty");

    // Burning the now-empty pot declines, still HTTP 200.
    let response = router
        .oneshot(post_json("/api/burn-plant", &json!({"pot_index": 4})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_plant_from_inventory_is_case_sensitive() {
    let state = make_test_state(120);
    let router = build_router(state);

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/plant-from-inventory",
            &json!({"species_name": "Beanstalk", "pot_index": 2}),
        ))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["pots"][2]["state"], "growing");
    assert!(json["instance_id"].is_string());

    let response = router
        .oneshot(post_json(
            "/api/plant-from-inventory",
            &json!({"species_name": "beanstalk", "pot_index": 3}),
        ))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], false);
}

// =========================================================================
// Experience
// =========================================================================

#[tokio::test]
async fn test_plant_xp_levels_a_live_plant() {
    let state = make_test_state(120);
    stage_beanstalk_slot(&state, 1).await;
    let router = build_router(state);

    let buy = router
        .clone()
        .oneshot(post_json(
            "/api/buy-seed",
            &json!({"slot_index": 0, "pot_index": 0}),
        ))
        .await
        .unwrap();
    let buy_json = body_to_json(buy.into_body()).await;
    let instance_id = buy_json["receipt"]["instance_id"].clone();

    // Beanstalk's first level-up costs exactly 20 XP.
    let response = router
        .oneshot(post_json(
            "/api/add-plant-experience",
            &json!({"instance_id": instance_id, "amount": 20}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["result"]["leveled_up"], true);
    assert_eq!(json["result"]["new_level"], 2);
}

#[tokio::test]
async fn test_xp_for_unknown_instance_is_neutral() {
    let state = make_test_state(120);
    let router = build_router(state);

    let ghost = PlantId::new();
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/add-plant-experience",
            &json!({"instance_id": ghost, "amount": 500}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["result"]["leveled_up"], false);
    assert_eq!(json["result"]["new_level"], 0);

    let response = router
        .oneshot(post_json(
            "/api/add-clipper-experience",
            &json!({"instance_id": ghost, "amount": 50.0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["result"]["leveled_up"], false);
}

// =========================================================================
// Money and reset
// =========================================================================

#[tokio::test]
async fn test_update_money() {
    let state = make_test_state(120);
    let router = build_router(state);

    let response = router
        .clone()
        .oneshot(post_json("/api/update-money", &json!({"coins": 5_000})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["coins"], 5_000);

    let response = router
        .oneshot(post_json("/api/update-money", &json!({"coins": -5})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_restores_starting_state() {
    let state = make_test_state(120);
    let router = build_router(state);

    router
        .clone()
        .oneshot(post_json("/api/update-money", &json!({"coins": 9_999})))
        .await
        .unwrap();

    let response = router
        .clone()
        .oneshot(post_json("/api/reset", &Value::Null))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["coins"], 120);

    let response = router
        .oneshot(Request::get("/api/game-state").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["coins"], 120);
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let state = make_test_state(120);
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/nonexistent").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
