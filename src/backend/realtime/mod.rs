//! Real-time update system
//!
//! Event fan-out over broadcast channels plus the SSE endpoints that expose
//! them to clients.

pub mod hub;
pub mod subscription;

pub use hub::EventHub;
