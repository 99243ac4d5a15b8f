//! Shared application state for the game API server.
//!
//! [`AppState`] holds the single [`GameSession`] behind a [`tokio::sync::Mutex`].
//! Every handler takes the lock for the full duration of its request, so each
//! HTTP request is one atomic transaction against the session: validation and
//! commit happen with no interleaved writer, and concurrent purchases can
//! never oversell a slot.

use std::sync::Arc;

use beanstock_engine::GameSession;
use tokio::sync::Mutex;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// The game session, serialized behind one lock per request.
    pub session: Arc<Mutex<GameSession>>,
}

impl AppState {
    /// Wrap a session for sharing across handlers.
    pub fn new(session: GameSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }
}
