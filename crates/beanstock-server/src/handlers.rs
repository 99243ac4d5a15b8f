//! REST API endpoint handlers for the game server.
//!
//! All handlers operate on the single [`GameSession`] behind the shared
//! [`AppState`] lock. Reads are impure by design: shop and pot views advance
//! rotation and growth to the current wall-clock time before rendering.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/shop` | Current shop rotation |
//! | `GET` | `/api/pots` | All pots with plant detail |
//! | `GET` | `/api/game-state` | Coins + shop + pots combined |
//! | `GET` | `/api/save` | Session snapshot as JSON |
//! | `POST` | `/api/buy-seed` | Buy from a slot, optionally into a pot |
//! | `POST` | `/api/burn-plant` | Destroy the plant in a pot |
//! | `POST` | `/api/plant-from-inventory` | Plant a species by name |
//! | `POST` | `/api/add-plant-experience` | Grant plant XP |
//! | `POST` | `/api/add-clipper-experience` | Grant clipper XP |
//! | `POST` | `/api/update-money` | Overwrite the coin balance |
//! | `POST` | `/api/reset` | Fresh session (clippers cleared) |
//!
//! Game declines come back as `success: false` inside an HTTP 200; only
//! malformed input and serialization faults produce 4xx/5xx via [`ApiError`].
//!
//! [`GameSession`]: beanstock_engine::GameSession

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use beanstock_types::PlantId;
use chrono::Utc;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request body structs
// ---------------------------------------------------------------------------

/// Body for `POST /api/buy-seed`.
#[derive(Debug, serde::Deserialize)]
pub struct BuySeedRequest {
    /// Shop slot to buy from.
    pub slot_index: usize,
    /// Pot to plant into; omit to buy without planting.
    pub pot_index: Option<u8>,
}

/// Body for `POST /api/burn-plant`.
#[derive(Debug, serde::Deserialize)]
pub struct BurnPlantRequest {
    /// Pot whose plant is destroyed.
    pub pot_index: usize,
}

/// Body for `POST /api/plant-from-inventory`.
#[derive(Debug, serde::Deserialize)]
pub struct PlantFromInventoryRequest {
    /// Species display name, case-sensitive.
    pub species_name: String,
    /// Pot to plant into.
    pub pot_index: u8,
}

/// Body for `POST /api/add-plant-experience`.
#[derive(Debug, serde::Deserialize)]
pub struct PlantXpRequest {
    /// Target plant instance.
    pub instance_id: PlantId,
    /// Experience points to grant.
    pub amount: u64,
}

/// Body for `POST /api/add-clipper-experience`.
#[derive(Debug, serde::Deserialize)]
pub struct ClipperXpRequest {
    /// Target plant instance.
    pub instance_id: PlantId,
    /// Clipper experience to grant. Fractional amounts accumulate.
    pub amount: f64,
}

/// Body for `POST /api/update-money`.
#[derive(Debug, serde::Deserialize)]
pub struct UpdateMoneyRequest {
    /// The new coin balance. Negative values are rejected.
    pub coins: i64,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing session status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let now = current_unix_time();
    let mut session = state.session.lock().await;
    let coins = session.coins();
    let pots_in_use = session.garden().occupied_count();
    let pot_count = session.garden().pot_count();
    let view = session.shop_view(now);
    let slot_count = view.slots.len();
    let next_rotation = view.time_until_refresh;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Grow A Beanstock</title>
    <style>
        body {{
            background: #0c120d;
            color: #cdd9ce;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #7ee787; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #121a13;
            border: 1px solid #2b3a2d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #7ee787; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        ul.get li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
        ul.post li::before {{ content: "POST "; color: #d29922; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #2b3a2d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Grow A Beanstock</h1>
    <p class="subtitle">Progression &amp; economy server</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Coins</div>
            <div class="value">{coins}</div>
        </div>
        <div class="metric">
            <div class="label">Pots in use</div>
            <div class="value">{pots_in_use}/{pot_count}</div>
        </div>
        <div class="metric">
            <div class="label">Shop slots</div>
            <div class="value">{slot_count}</div>
        </div>
        <div class="metric">
            <div class="label">Next rotation</div>
            <div class="value">{next_rotation}s</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul class="get">
        <li><a href="/api/shop">/api/shop</a> -- Current shop rotation</li>
        <li><a href="/api/pots">/api/pots</a> -- All pots with plant detail</li>
        <li><a href="/api/game-state">/api/game-state</a> -- Coins + shop + pots</li>
        <li><a href="/api/save">/api/save</a> -- Session snapshot JSON</li>
    </ul>
    <ul class="post">
        <li>/api/buy-seed -- {{slot_index, pot_index?}}</li>
        <li>/api/burn-plant -- {{pot_index}}</li>
        <li>/api/plant-from-inventory -- {{species_name, pot_index}}</li>
        <li>/api/add-plant-experience -- {{instance_id, amount}}</li>
        <li>/api/add-clipper-experience -- {{instance_id, amount}}</li>
        <li>/api/update-money -- {{coins}}</li>
        <li>/api/reset</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/shop -- current rotation
// ---------------------------------------------------------------------------

/// Return the current shop view, rotating first if the deadline has passed.
pub async fn get_shop(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let now = current_unix_time();
    let mut session = state.session.lock().await;
    Json(session.shop_view(now))
}

// ---------------------------------------------------------------------------
// GET /api/pots -- all pots
// ---------------------------------------------------------------------------

/// Return all pots, advancing growth timers to the current time first.
pub async fn get_pots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let now = current_unix_time();
    let mut session = state.session.lock().await;
    Json(session.pots_view(now))
}

// ---------------------------------------------------------------------------
// GET /api/game-state -- combined view
// ---------------------------------------------------------------------------

/// Return coins, shop, and pots in one response.
pub async fn get_game_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let now = current_unix_time();
    let mut session = state.session.lock().await;
    Json(session.game_state_view(now))
}

// ---------------------------------------------------------------------------
// GET /api/save -- session snapshot
// ---------------------------------------------------------------------------

/// Return a snapshot of the session suitable for persistence.
///
/// Clipper progress is deliberately absent from the snapshot; it resets
/// every session.
pub async fn save(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let now = current_unix_time();
    let session = state.session.lock().await;
    let snapshot = session.snapshot(now);
    Ok(Json(serde_json::to_value(&snapshot)?))
}

// ---------------------------------------------------------------------------
// POST /api/buy-seed -- purchase
// ---------------------------------------------------------------------------

/// Buy a seed from a shop slot, optionally planting it into a pot.
///
/// Both outcomes are HTTP 200: a successful purchase carries the receipt, a
/// decline carries the reason. The refreshed coin balance, shop, and pots
/// ride along either way so the client can re-render from this response
/// alone.
pub async fn buy_seed(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BuySeedRequest>,
) -> impl IntoResponse {
    let now = current_unix_time();
    let mut session = state.session.lock().await;
    let result = session.buy_seed(req.slot_index, req.pot_index, now);

    let coins = session.coins();
    let shop = session.shop_view(now);
    let pots = session.pots_view(now);

    match result {
        Ok(receipt) => Json(serde_json::json!({
            "success": true,
            "receipt": receipt,
            "coins": coins,
            "shop": shop,
            "pots": pots,
        })),
        Err(declined) => Json(serde_json::json!({
            "success": false,
            "message": declined.to_string(),
            "coins": coins,
            "shop": shop,
            "pots": pots,
        })),
    }
}

// ---------------------------------------------------------------------------
// POST /api/burn-plant -- destroy a plant
// ---------------------------------------------------------------------------

/// Destroy the plant in a pot, freeing it for replanting.
pub async fn burn_plant(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BurnPlantRequest>,
) -> impl IntoResponse {
    let now = current_unix_time();
    let mut session = state.session.lock().await;

    match session.burn_plant(req.pot_index) {
        Ok(_) => {
            let pots = session.pots_view(now);
            Json(serde_json::json!({
                "success": true,
                "message": format!("Plant burned in pot {}", req.pot_index),
                "pots": pots,
            }))
        }
        Err(declined) => Json(serde_json::json!({
            "success": false,
            "message": declined.to_string(),
        })),
    }
}

// ---------------------------------------------------------------------------
// POST /api/plant-from-inventory -- plant by species name
// ---------------------------------------------------------------------------

/// Plant a species into a pot by display name, bypassing the shop.
///
/// This is the entry point for externally-won seeds; the name lookup is
/// case-sensitive.
pub async fn plant_from_inventory(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlantFromInventoryRequest>,
) -> impl IntoResponse {
    let now = current_unix_time();
    let mut session = state.session.lock().await;

    match session.plant_from_inventory(&req.species_name, req.pot_index, now) {
        Ok(instance_id) => {
            let pots = session.pots_view(now);
            Json(serde_json::json!({
                "success": true,
                "instance_id": instance_id,
                "pots": pots,
            }))
        }
        Err(declined) => Json(serde_json::json!({
            "success": false,
            "message": declined.to_string(),
        })),
    }
}

// ---------------------------------------------------------------------------
// POST /api/add-plant-experience -- grant plant XP
// ---------------------------------------------------------------------------

/// Grant experience to a plant instance.
///
/// Fire-and-forget: an unknown instance id (for example one burned by an
/// earlier request) yields the neutral no-change record, never an error.
pub async fn add_plant_experience(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlantXpRequest>,
) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    let result = session.add_plant_experience(req.instance_id, req.amount);
    Json(serde_json::json!({
        "success": true,
        "result": result,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/add-clipper-experience -- grant clipper XP
// ---------------------------------------------------------------------------

/// Grant clipper experience to a plant instance.
///
/// Locked clippers and unknown instance ids yield the neutral record.
pub async fn add_clipper_experience(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClipperXpRequest>,
) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    let result = session.add_clipper_experience(req.instance_id, req.amount);
    Json(serde_json::json!({
        "success": true,
        "result": result,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/update-money -- overwrite the balance
// ---------------------------------------------------------------------------

/// Overwrite the coin balance. Intended for external correction flows.
///
/// Negative balances are rejected with a 400; this is the one game decline
/// treated as a protocol error, because no client should ever ask for it.
pub async fn update_money(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateMoneyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut session = state.session.lock().await;

    let coins = session
        .set_coin_balance(req.coins)
        .map_err(|declined| ApiError::BadRequest(declined.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "coins": coins,
        "message": format!("Money updated to {coins}"),
    })))
}

// ---------------------------------------------------------------------------
// POST /api/reset -- fresh session
// ---------------------------------------------------------------------------

/// Reset the session to its starting state.
///
/// Coins return to the configured starting balance, garden and shop are
/// rebuilt, and all clipper progress is gone.
pub async fn reset(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let now = current_unix_time();
    let mut session = state.session.lock().await;
    session.reset(now);

    let view = session.game_state_view(now);
    Json(serde_json::json!({
        "success": true,
        "coins": view.coins,
        "shop": view.shop,
        "pots": view.pots,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Current Unix time in seconds. A pre-epoch clock reads as zero.
fn current_unix_time() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}
