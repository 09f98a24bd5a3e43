//! Messaging Module
//!
//! Data structures for the direct-messaging system:
//!
//! - `Thread` - A 1:1 conversation container between two users
//! - `Message` - A single message within a thread
//! - `MessageCursor` - Compound cursor for backward pagination

pub mod message;
pub mod thread;

// Re-export all types
pub use message::{
    Attachment, InvalidCursor, ListMessagesResponse, Message, MessageCursor, SendMessageRequest,
    SendMessageResponse, MAX_CONTENT_CHARS, PREVIEW_MAX_CHARS,
};
pub use thread::{
    canonical_pair, participants_key, CreateThreadRequest, ListThreadsResponse,
    ParticipantProfile, Thread, ThreadSummary,
};
