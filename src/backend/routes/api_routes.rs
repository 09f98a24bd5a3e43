//! API Route Handlers
//!
//! Route configuration for the direct-messaging API. The caller's identity
//! comes from the gateway-set `x-user-id` header on every route.
//!
//! # Routes
//!
//! ## Threads
//! - `POST /api/dm/threads` - Get or create the thread with another user
//! - `GET /api/dm/threads` - List the caller's threads
//! - `GET /api/dm/threads/{thread_id}` - Get one thread
//! - `POST /api/dm/threads/{thread_id}/read` - Zero the caller's unread counter
//!
//! ## Messages
//! - `GET /api/dm/threads/{thread_id}/messages` - Page through history
//! - `POST /api/dm/threads/{thread_id}/messages` - Send a message
//!
//! ## Real-time
//! - `GET /api/dm/events` - Personal event stream (SSE)
//! - `GET /api/dm/threads/{thread_id}/events` - Thread event stream (SSE)

use axum::Router;

use crate::backend::messaging::handlers::{
    create_thread, get_thread, list_messages, list_threads, mark_thread_read, send_message,
};
use crate::backend::realtime::subscription::{personal_events, thread_events};
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Thread endpoints
        .route(
            "/api/dm/threads",
            axum::routing::post(create_thread).get(list_threads),
        )
        .route(
            "/api/dm/threads/{thread_id}",
            axum::routing::get(get_thread),
        )
        .route(
            "/api/dm/threads/{thread_id}/read",
            axum::routing::post(mark_thread_read),
        )
        // Message endpoints
        .route(
            "/api/dm/threads/{thread_id}/messages",
            axum::routing::get(list_messages).post(send_message),
        )
        // Real-time subscriptions
        .route("/api/dm/events", axum::routing::get(personal_events))
        .route(
            "/api/dm/threads/{thread_id}/events",
            axum::routing::get(thread_events),
        )
}
