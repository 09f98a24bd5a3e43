//! Thread Data Structure
//!
//! A thread is a persistent 1:1 conversation container between exactly two
//! participants, identified by a canonical pair key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Denormalized display snapshot for one thread participant.
///
/// Captured from the participant directory at thread creation and stored on
/// the thread row so listing threads never fans out to the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantProfile {
    pub id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Represents a direct-message thread between two users.
///
/// `participant_a` and `participant_b` are canonically sorted (`a < b`) and
/// `participants_key` is derived from them once at creation; together with a
/// uniqueness constraint on the key this guarantees at most one thread per
/// pair of users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thread {
    /// Unique thread ID
    pub id: Uuid,
    /// Lower of the two participant IDs
    pub participant_a: Uuid,
    /// Higher of the two participant IDs
    pub participant_b: Uuid,
    /// Canonical pair key, `"{a}:{b}"` over the sorted IDs
    pub participants_key: String,
    /// Display snapshot per participant, captured at creation
    pub participant_meta: Vec<ParticipantProfile>,
    /// Preview text of the most recent message
    pub last_message_preview: Option<String>,
    /// When the most recent message was sent
    pub last_message_at: Option<DateTime<Utc>>,
    /// Who sent the most recent message
    pub last_sender_id: Option<Uuid>,
    /// Unread counter for `participant_a`
    pub unread_a: i64,
    /// Unread counter for `participant_b`
    pub unread_b: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sort a pair of user IDs into canonical order.
pub fn canonical_pair(user_id: Uuid, target_user_id: Uuid) -> (Uuid, Uuid) {
    if user_id <= target_user_id {
        (user_id, target_user_id)
    } else {
        (target_user_id, user_id)
    }
}

/// Derive the canonical pair key for two user IDs, in either order.
pub fn participants_key(user_id: Uuid, target_user_id: Uuid) -> String {
    let (a, b) = canonical_pair(user_id, target_user_id);
    format!("{}:{}", a, b)
}

impl Thread {
    /// Check if a user is one of the two participants.
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participant_a == user_id || self.participant_b == user_id
    }

    /// Get the other participant of the thread.
    pub fn other_participant(&self, user_id: Uuid) -> Option<Uuid> {
        if self.participant_a == user_id {
            Some(self.participant_b)
        } else if self.participant_b == user_id {
            Some(self.participant_a)
        } else {
            None
        }
    }

    /// Unread counter slot for a participant, `None` for outsiders.
    pub fn unread_count_for(&self, user_id: Uuid) -> Option<i64> {
        if self.participant_a == user_id {
            Some(self.unread_a)
        } else if self.participant_b == user_id {
            Some(self.unread_b)
        } else {
            None
        }
    }

    /// Build a summary scoped to one participant's view of the thread.
    ///
    /// The unread count is the viewer's own slot, so the same append produces
    /// different summaries for the sender and the recipient.
    pub fn summary_for(&self, viewer_id: Uuid) -> ThreadSummary {
        ThreadSummary {
            id: self.id,
            other: self
                .other_participant(viewer_id)
                .and_then(|other| self.participant_meta.iter().find(|p| p.id == other).cloned()),
            last_message_preview: self.last_message_preview.clone(),
            last_message_at: self.last_message_at,
            last_sender_id: self.last_sender_id,
            unread_count: self.unread_count_for(viewer_id).unwrap_or(0),
            updated_at: self.updated_at,
        }
    }
}

/// One participant's view of a thread, used in event payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadSummary {
    pub id: Uuid,
    /// Display snapshot of the other participant
    pub other: Option<ParticipantProfile>,
    pub last_message_preview: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub last_sender_id: Option<Uuid>,
    /// The viewer's own unread counter
    pub unread_count: i64,
    pub updated_at: DateTime<Utc>,
}

/// Request to get or create the thread with another user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateThreadRequest {
    pub target_user_id: Uuid,
}

/// Response for listing threads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListThreadsResponse {
    pub threads: Vec<Thread>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thread_between(a: Uuid, b: Uuid) -> Thread {
        let (a, b) = canonical_pair(a, b);
        let now = Utc::now();
        Thread {
            id: Uuid::new_v4(),
            participant_a: a,
            participant_b: b,
            participants_key: participants_key(a, b),
            participant_meta: vec![
                ParticipantProfile {
                    id: a,
                    display_name: "alice".to_string(),
                    avatar_url: None,
                },
                ParticipantProfile {
                    id: b,
                    display_name: "bob".to_string(),
                    avatar_url: None,
                },
            ],
            last_message_preview: None,
            last_message_at: None,
            last_sender_id: None,
            unread_a: 2,
            unread_b: 5,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_participants_key_order_independent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(participants_key(a, b), participants_key(b, a));
    }

    #[test]
    fn test_canonical_pair_sorts() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let (lo, hi) = canonical_pair(a, b);
        assert!(lo <= hi);
        assert_eq!(canonical_pair(a, b), canonical_pair(b, a));
    }

    #[test]
    fn test_unread_count_for_slots() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let thread = thread_between(a, b);
        assert_eq!(thread.unread_count_for(thread.participant_a), Some(2));
        assert_eq!(thread.unread_count_for(thread.participant_b), Some(5));
        assert_eq!(thread.unread_count_for(Uuid::new_v4()), None);
    }

    #[test]
    fn test_other_participant() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let thread = thread_between(a, b);
        assert_eq!(
            thread.other_participant(thread.participant_a),
            Some(thread.participant_b)
        );
        assert_eq!(
            thread.other_participant(thread.participant_b),
            Some(thread.participant_a)
        );
        assert_eq!(thread.other_participant(Uuid::new_v4()), None);
    }

    #[test]
    fn test_summary_scoped_to_viewer() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let thread = thread_between(a, b);

        let summary_a = thread.summary_for(thread.participant_a);
        let summary_b = thread.summary_for(thread.participant_b);

        assert_eq!(summary_a.unread_count, 2);
        assert_eq!(summary_b.unread_count, 5);
        assert_eq!(
            summary_a.other.as_ref().map(|p| p.id),
            Some(thread.participant_b)
        );
        assert_eq!(
            summary_b.other.as_ref().map(|p| p.id),
            Some(thread.participant_a)
        );
    }
}
