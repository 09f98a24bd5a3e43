//! Chatline - Direct-Messaging Engine
//!
//! The 1:1 messaging subsystem of a social-networking backend: canonical
//! thread identity resolution, atomic message append with denormalized
//! thread-state maintenance, per-user unread counters, and cursor-based
//! backward pagination of message history.
//!
//! # Module Structure
//!
//! - **`shared`** - Domain types, the error taxonomy, and real-time events
//! - **`backend`** - The axum HTTP server, stores, services, and
//!   collaborator boundaries
//!
//! # Design
//!
//! Threads are created lazily on first contact between a pair of users and
//! identified by a canonical pair key (sorted participant IDs joined with
//! `":"`) carrying a uniqueness constraint; concurrent first contacts race
//! on the insert and the loser re-reads the winner's row. Message sends are
//! two independent atomic statements: an append-only insert, then one
//! conditional UPDATE that refreshes the thread's preview fields and moves
//! both unread counters relative to their stored values, so concurrent
//! sends never lose an increment.
//!
//! Auth/session management, media storage, search, and the friend graph
//! are separate services; this crate consumes a participant directory and
//! a push gateway, and exposes results over HTTP plus SSE event streams.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
