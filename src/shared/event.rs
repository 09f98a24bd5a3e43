//! Real-time Event System
//!
//! Event types fanned out to participant channels after storage operations
//! complete. Delivery is best-effort, at-most-once; a missed event is
//! recovered by the client's next list or refetch.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::messaging::{Message, ThreadSummary};

/// Type of direct-messaging event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DmEventKind {
    /// A message was appended to a thread
    NewMessage,
    /// Thread state changed without a new message (mark-as-read)
    ThreadUpdated,
}

/// A direct-messaging event broadcast to subscribers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DmEvent {
    pub kind: DmEventKind,
    /// Thread the event belongs to
    pub thread_id: Uuid,
    /// Event payload (JSON-serializable data)
    pub payload: serde_json::Value,
    /// When the event was published
    pub timestamp: DateTime<Utc>,
}

impl DmEvent {
    fn new(kind: DmEventKind, thread_id: Uuid, payload: serde_json::Value) -> Self {
        Self {
            kind,
            thread_id,
            payload,
            timestamp: Utc::now(),
        }
    }

    /// New-message event for one participant's personal channel.
    ///
    /// Carries the thread summary scoped to that participant's own unread
    /// count, plus the message itself.
    pub fn new_message(summary: &ThreadSummary, message: &Message) -> Self {
        Self::new(
            DmEventKind::NewMessage,
            summary.id,
            serde_json::json!({
                "thread": summary,
                "message": message,
            }),
        )
    }

    /// New-message event for the shared thread channel.
    pub fn thread_message(message: &Message) -> Self {
        Self::new(
            DmEventKind::NewMessage,
            message.thread_id,
            serde_json::json!({
                "message": message,
            }),
        )
    }

    /// Thread-updated event for the reader's personal channel.
    pub fn thread_updated(summary: &ThreadSummary) -> Self {
        Self::new(
            DmEventKind::ThreadUpdated,
            summary.id,
            serde_json::json!({
                "thread": summary,
            }),
        )
    }

    /// SSE event name for this event
    pub fn event_name(&self) -> &'static str {
        match self.kind {
            DmEventKind::NewMessage => "new_message",
            DmEventKind::ThreadUpdated => "thread_updated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::messaging::ParticipantProfile;

    fn summary(unread: i64) -> ThreadSummary {
        ThreadSummary {
            id: Uuid::new_v4(),
            other: Some(ParticipantProfile {
                id: Uuid::new_v4(),
                display_name: "bob".to_string(),
                avatar_url: None,
            }),
            last_message_preview: Some("hi".to_string()),
            last_message_at: Some(Utc::now()),
            last_sender_id: Some(Uuid::new_v4()),
            unread_count: unread,
            updated_at: Utc::now(),
        }
    }

    fn message() -> Message {
        Message {
            id: Uuid::new_v4(),
            thread_id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            recipient_id: Uuid::new_v4(),
            content: Some("hi".to_string()),
            attachments: Vec::new(),
            read_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_message_event() {
        let summary = summary(4);
        let message = message();
        let event = DmEvent::new_message(&summary, &message);

        assert_eq!(event.kind, DmEventKind::NewMessage);
        assert_eq!(event.thread_id, summary.id);
        assert_eq!(event.payload["thread"]["unread_count"], 4);
        assert_eq!(
            event.payload["message"]["id"],
            serde_json::json!(message.id)
        );
        assert_eq!(event.event_name(), "new_message");
    }

    #[test]
    fn test_thread_message_event() {
        let message = message();
        let event = DmEvent::thread_message(&message);
        assert_eq!(event.thread_id, message.thread_id);
        assert!(event.payload.get("thread").is_none());
    }

    #[test]
    fn test_thread_updated_event() {
        let summary = summary(0);
        let event = DmEvent::thread_updated(&summary);
        assert_eq!(event.kind, DmEventKind::ThreadUpdated);
        assert_eq!(event.payload["thread"]["unread_count"], 0);
        assert_eq!(event.event_name(), "thread_updated");
    }

    #[test]
    fn test_event_serialization() {
        let event = DmEvent::thread_updated(&summary(1));
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: DmEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event.kind, deserialized.kind);
        assert_eq!(event.thread_id, deserialized.thread_id);
    }
}
