//! Shared Module
//!
//! Types and data structures shared between the messaging services and the
//! HTTP API layer: domain models, the error taxonomy, and real-time events.
//! All types are designed for serialization and transmission over HTTP.

/// Shared error types
pub mod error;

/// Real-time event system
pub mod event;

/// Messaging domain types
pub mod messaging;

/// Re-export commonly used types for convenience
pub use error::MessagingError;
pub use event::{DmEvent, DmEventKind};
