//! Application State Management
//!
//! The central state container shared across request handlers, plus the
//! `FromRef` impls that let handlers extract individual pieces.
//!
//! # Thread Safety
//!
//! Every field is designed for concurrent access: the pool and the event
//! hub are internally synchronized and cheaply cloneable, and the
//! collaborator boundaries are shared behind `Arc`.

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::directory::ParticipantDirectory;
use crate::backend::push::PushSender;
use crate::backend::realtime::EventHub;

/// Application state for the messaging backend
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool; the engine's source of truth
    pub db_pool: PgPool,

    /// Broadcast hub for per-user and per-thread event channels
    pub events: EventHub,

    /// Display-metadata lookup, consulted at thread creation
    pub directory: Arc<dyn ParticipantDirectory>,

    /// Best-effort push alert dispatch
    pub push: Arc<dyn PushSender>,
}

/// Allow handlers to extract the pool directly
impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allow handlers to extract the event hub directly
impl FromRef<AppState> for EventHub {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.events.clone()
    }
}
