//! Property-based tests for messaging types
//!
//! Uses proptest to generate random inputs and verify invariants of the
//! canonical pair key, message previews, and the pagination cursor.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use chatline::shared::messaging::{
    canonical_pair, participants_key, Attachment, Message, MessageCursor, PREVIEW_MAX_CHARS,
};

fn message_with(content: Option<String>, attachments: usize, created_at: DateTime<Utc>) -> Message {
    Message {
        id: Uuid::new_v4(),
        thread_id: Uuid::new_v4(),
        sender_id: Uuid::new_v4(),
        recipient_id: Uuid::new_v4(),
        content,
        attachments: (0..attachments)
            .map(|i| Attachment {
                url: format!("https://cdn.example.com/{}", i),
                kind: None,
                name: None,
            })
            .collect(),
        read_at: None,
        created_at,
    }
}

proptest! {
    #[test]
    fn test_participants_key_is_order_independent(a in any::<u128>(), b in any::<u128>()) {
        let a = Uuid::from_u128(a);
        let b = Uuid::from_u128(b);
        prop_assert_eq!(participants_key(a, b), participants_key(b, a));
    }

    #[test]
    fn test_canonical_pair_is_sorted(a in any::<u128>(), b in any::<u128>()) {
        let (lo, hi) = canonical_pair(Uuid::from_u128(a), Uuid::from_u128(b));
        prop_assert!(lo <= hi);
        prop_assert_eq!(participants_key(lo, hi), format!("{}:{}", lo, hi));
    }

    #[test]
    fn test_preview_never_exceeds_bound(content in ".*") {
        let message = message_with(Some(content), 0, Utc::now());
        prop_assert!(message.preview().chars().count() <= PREVIEW_MAX_CHARS);
    }

    #[test]
    fn test_preview_is_never_empty_for_valid_messages(
        content in "\\PC*",
        attachments in 1usize..5,
    ) {
        // Any message that passes validation has text or attachments;
        // either way the preview has something to show.
        let message = message_with(Some(content), attachments, Utc::now());
        prop_assert!(!message.preview().is_empty());
    }

    #[test]
    fn test_cursor_round_trips(
        micros in 0i64..4_102_444_800_000_000,
        id in any::<u128>(),
    ) {
        let created_at = DateTime::from_timestamp_micros(micros).unwrap();
        let cursor = MessageCursor { created_at, id: Uuid::from_u128(id) };
        let parsed: MessageCursor = cursor.to_string().parse().unwrap();
        prop_assert_eq!(parsed, cursor);
    }
}
