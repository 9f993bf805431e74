//! Part abbreviation HTTP API server (Axum).
//!
//! Single and bulk abbreviation, verification, dictionary management, CSV
//! batch processing and usage statistics.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;
use tower_http::trace::TraceLayer;

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::abbreviation_routes())
        .merge(routes::dictionary_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
