//! Axum router construction for the game API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so the browser client can call the API from any origin.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the game server.
///
/// The route list mirrors the handler table in [`handlers`]: four read
/// endpoints plus the status page, and seven mutations.
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Reads
        .route("/api/shop", get(handlers::get_shop))
        .route("/api/pots", get(handlers::get_pots))
        .route("/api/game-state", get(handlers::get_game_state))
        .route("/api/save", get(handlers::save))
        // Mutations
        .route("/api/buy-seed", post(handlers::buy_seed))
        .route("/api/burn-plant", post(handlers::burn_plant))
        .route("/api/plant-from-inventory", post(handlers::plant_from_inventory))
        .route("/api/add-plant-experience", post(handlers::add_plant_experience))
        .route("/api/add-clipper-experience", post(handlers::add_clipper_experience))
        .route("/api/update-money", post(handlers::update_money))
        .route("/api/reset", post(handlers::reset))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
