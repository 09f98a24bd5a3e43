//! Message Data Structure
//!
//! A message is a single immutable unit of content and/or attachments sent
//! within a thread, plus the compound cursor used for backward pagination.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::thread::Thread;

/// Maximum accepted length of message text, in characters.
pub const MAX_CONTENT_CHARS: usize = 4000;

/// Maximum length of the denormalized thread preview, in characters.
pub const PREVIEW_MAX_CHARS: usize = 120;

/// A file or media attachment carried by a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub url: String,
    /// MIME-ish kind hint, e.g. "image" or "file"
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Represents a direct message.
///
/// Invariant: trimmed `content` is non-empty OR `attachments` is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Unique message ID
    pub id: Uuid,
    /// Thread this message belongs to
    pub thread_id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    /// Message text, absent for attachment-only messages
    pub content: Option<String>,
    /// Ordered attachment list
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Reserved for per-message read receipts; never set by this service
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Preview string for the owning thread's denormalized state.
    ///
    /// Trimmed text when present, truncated to [`PREVIEW_MAX_CHARS`];
    /// otherwise an attachment marker, singular or plural by count.
    pub fn preview(&self) -> String {
        if let Some(text) = self.content.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            if text.chars().count() <= PREVIEW_MAX_CHARS {
                return text.to_string();
            }
            let mut preview: String = text.chars().take(PREVIEW_MAX_CHARS - 3).collect();
            preview.push_str("...");
            return preview;
        }
        match self.attachments.len() {
            1 => "sent an attachment".to_string(),
            n => format!("sent {} attachments", n),
        }
    }
}

/// Compound pagination cursor over `(created_at, id)`.
///
/// Keying on the timestamp alone skips or duplicates rows when two messages
/// share a timestamp; the message ID breaks those ties deterministically.
/// Rendered as `"<rfc3339>~<uuid>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCursor {
    pub created_at: DateTime<Utc>,
    pub id: Uuid,
}

impl MessageCursor {
    pub fn of(message: &Message) -> Self {
        Self {
            created_at: message.created_at,
            id: message.id,
        }
    }
}

impl fmt::Display for MessageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}~{}",
            self.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            self.id
        )
    }
}

/// Error parsing a [`MessageCursor`] from its string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCursor;

impl fmt::Display for InvalidCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed pagination cursor")
    }
}

impl std::error::Error for InvalidCursor {}

impl FromStr for MessageCursor {
    type Err = InvalidCursor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ts, id) = s.split_once('~').ok_or(InvalidCursor)?;
        let created_at = DateTime::parse_from_rfc3339(ts)
            .map_err(|_| InvalidCursor)?
            .with_timezone(&Utc);
        let id = Uuid::parse_str(id).map_err(|_| InvalidCursor)?;
        Ok(Self { created_at, id })
    }
}

/// Request to send a message into a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub recipient_id: Uuid,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Response after sending a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub thread: Thread,
    pub message: Message,
}

/// Response for listing messages in a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    pub thread: Thread,
    /// Page in ascending `created_at` order
    pub messages: Vec<Message>,
    pub has_more: bool,
    /// Cursor of the oldest row in the page, when more history exists
    pub next_cursor: Option<String>,
}
