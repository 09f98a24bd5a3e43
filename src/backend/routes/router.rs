//! Router Configuration
//!
//! Combines all route configurations into a single axum router.

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the axum router with all routes configured
///
/// # Routes
///
/// - `/api/dm/*` - Thread and message endpoints, event subscriptions
/// - Fallback handler returning 404 for unknown routes
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new());

    router
        .fallback(|| async { "404 Not Found" })
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
