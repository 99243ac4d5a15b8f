//! HTTP transport for the Grow A Beanstock game engine.
//!
//! This crate exposes the engine's session operations over an Axum REST
//! API:
//!
//! - **Read endpoints** for the shop, pots, combined game state, and a
//!   session snapshot; reads lazily advance rotation and growth timers.
//! - **Mutation endpoints** for purchases, burning, planting, experience
//!   grants, balance overwrite, and session reset.
//! - **Minimal HTML status page** (`GET /`) showing coins, pot occupancy,
//!   and the rotation countdown.
//!
//! # Architecture
//!
//! One [`GameSession`] lives behind a [`tokio::sync::Mutex`] in
//! [`AppState`]. Each request holds the lock for its full duration, which
//! makes every HTTP request a single atomic transaction against the
//! session; concurrent purchases serialize and can never oversell a slot.
//!
//! [`GameSession`]: beanstock_engine::GameSession
//! [`AppState`]: state::AppState

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
