//! Backend Module
//!
//! Server-side code for the direct-messaging engine: an axum HTTP server
//! over PostgreSQL with real-time event fan-out and best-effort push
//! notification dispatch.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`messaging`** - Store functions, services, and handlers for threads
//!   and messages
//! - **`realtime`** - Broadcast hub and SSE subscription endpoints
//! - **`directory`** - Participant directory adapter
//! - **`push`** - Push notification boundary
//! - **`middleware`** - Gateway identity extraction
//! - **`error`** - API error types
//!
//! # State Management
//!
//! Shared state (`AppState`) carries the database pool, the event hub, and
//! the collaborator adapters. Correctness under concurrent requests relies
//! on atomic conditional updates at the storage layer, not on in-process
//! locks; the only locked structures are the event hub's channel maps.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Messaging stores, services, and handlers
pub mod messaging;

/// Real-time update system
pub mod realtime;

/// Participant directory adapter
pub mod directory;

/// Push notification boundary
pub mod push;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::ApiError;
pub use realtime::EventHub;
pub use server::{create_app, AppState, ServerConfig};
