// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::domain::repositories::TeamRepository;
use handlers::teams;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub teams: Arc<dyn TeamRepository>,
}

impl AppState {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }
}

/// Builds the HTTP router over a team repository
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(teams::health_check))
        // Team routes
        .route("/api/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/api/teams/:id",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        // Shared state
        .with_state(state)
}
