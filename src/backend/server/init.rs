//! Server Initialization
//!
//! Builds the application from configuration: database pool with
//! migrations, event hub with its periodic channel cleanup, collaborator
//! adapters, and the configured router.

use std::sync::Arc;

use axum::Router;

use crate::backend::directory::PgDirectory;
use crate::backend::push::{DisabledPushSender, HttpPushSender, PushSender};
use crate::backend::realtime::EventHub;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the axum application
///
/// # Initialization Steps
///
/// 1. Connect the database pool and run migrations
/// 2. Create the event hub and its broadcast channels
/// 3. Wire the directory adapter and push sender
/// 4. Create the router and start the channel cleanup task
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing chatline backend server");

    let db_pool = connect_database(config).await?;

    let events = EventHub::new();
    let directory = Arc::new(PgDirectory::new(db_pool.clone()));

    let push: Arc<dyn PushSender> = match &config.push_gateway_url {
        Some(url) => {
            tracing::info!(endpoint = %url, "push gateway configured");
            Arc::new(HttpPushSender::new(url.clone()))
        }
        None => {
            tracing::info!("no push gateway configured, alerts disabled");
            Arc::new(DisabledPushSender)
        }
    };

    let app_state = AppState {
        db_pool,
        events,
        directory,
        push,
    };

    // Evict broadcast channels whose subscribers have all disconnected.
    let cleanup_hub = app_state.events.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            cleanup_hub.cleanup_inactive_channels();
            tracing::debug!("cleaned up inactive event channels");
        }
    });

    tracing::info!("Router configured with periodic cleanup task");

    Ok(create_router(app_state))
}
