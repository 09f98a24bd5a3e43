//! Database operations for messaging
//!
//! Store functions for threads and messages. All concurrency control lives
//! here, in single-statement conditional updates: thread creation races are
//! resolved by the unique `participants_key`, and unread counters move by
//! relative increments inside one UPDATE so concurrent sends never lose an
//! update.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::messaging::{Attachment, Message, MessageCursor, ParticipantProfile, Thread};

fn thread_from_row(row: &PgRow) -> Thread {
    Thread {
        id: row.get("id"),
        participant_a: row.get("participant_a"),
        participant_b: row.get("participant_b"),
        participants_key: row.get("participants_key"),
        participant_meta: row
            .get::<Json<Vec<ParticipantProfile>>, _>("participant_meta")
            .0,
        last_message_preview: row.get("last_message_preview"),
        last_message_at: row.get("last_message_at"),
        last_sender_id: row.get("last_sender_id"),
        unread_a: row.get("unread_a"),
        unread_b: row.get("unread_b"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn message_from_row(row: &PgRow) -> Message {
    Message {
        id: row.get("id"),
        thread_id: row.get("thread_id"),
        sender_id: row.get("sender_id"),
        recipient_id: row.get("recipient_id"),
        content: row.get("content"),
        attachments: row.get::<Json<Vec<Attachment>>, _>("attachments").0,
        read_at: row.get("read_at"),
        created_at: row.get("created_at"),
    }
}

/// Get a thread by its canonical pair key
pub async fn get_thread_by_key(pool: &PgPool, key: &str) -> Result<Option<Thread>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, participant_a, participant_b, participants_key, participant_meta,
               last_message_preview, last_message_at, last_sender_id,
               unread_a, unread_b, created_at, updated_at
        FROM threads
        WHERE participants_key = $1
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| thread_from_row(&r)))
}

/// Get a thread by ID
pub async fn get_thread_by_id(
    pool: &PgPool,
    thread_id: Uuid,
) -> Result<Option<Thread>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, participant_a, participant_b, participants_key, participant_meta,
               last_message_preview, last_message_at, last_sender_id,
               unread_a, unread_b, created_at, updated_at
        FROM threads
        WHERE id = $1
        "#,
    )
    .bind(thread_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| thread_from_row(&r)))
}

/// Insert a new thread, yielding to a concurrent winner on key conflict.
///
/// `ON CONFLICT DO NOTHING` on the unique `participants_key` makes the
/// first-contact race benign: returns `true` when this call created the
/// row, `false` when another writer got there first and the caller should
/// re-read by key.
pub async fn insert_thread(pool: &PgPool, thread: &Thread) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO threads (id, participant_a, participant_b, participants_key,
                             participant_meta, unread_a, unread_b, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, 0, 0, $6, $7)
        ON CONFLICT (participants_key) DO NOTHING
        "#,
    )
    .bind(thread.id)
    .bind(thread.participant_a)
    .bind(thread.participant_b)
    .bind(&thread.participants_key)
    .bind(Json(&thread.participant_meta))
    .bind(thread.created_at)
    .bind(thread.updated_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// List threads containing a user, most recently updated first
pub async fn list_threads_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Thread>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, participant_a, participant_b, participants_key, participant_meta,
               last_message_preview, last_message_at, last_sender_id,
               unread_a, unread_b, created_at, updated_at
        FROM threads
        WHERE participant_a = $1 OR participant_b = $1
        ORDER BY updated_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(thread_from_row).collect())
}

/// Count all threads containing a user
pub async fn count_threads_for_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS count
        FROM threads
        WHERE participant_a = $1 OR participant_b = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get("count"))
}

/// Store a message in the append-only log
pub async fn insert_message(pool: &PgPool, message: &Message) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO messages (id, thread_id, sender_id, recipient_id,
                              content, attachments, read_at, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(message.id)
    .bind(message.thread_id)
    .bind(message.sender_id)
    .bind(message.recipient_id)
    .bind(&message.content)
    .bind(Json(&message.attachments))
    .bind(message.read_at)
    .bind(message.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Apply a freshly appended message to its thread's denormalized state.
///
/// One conditional UPDATE: sets the preview fields, zeroes the sender's
/// unread slot and bumps the recipient's by one, all relative to the stored
/// row so concurrent sends interleave without losing an increment. Returns
/// `None` when the thread no longer exists.
pub async fn apply_message_to_thread(
    pool: &PgPool,
    thread_id: Uuid,
    sender_id: Uuid,
    preview: &str,
    sent_at: DateTime<Utc>,
) -> Result<Option<Thread>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        UPDATE threads SET
            last_message_preview = $3,
            last_message_at = $4,
            last_sender_id = $2,
            updated_at = $4,
            unread_a = CASE WHEN participant_a = $2 THEN 0 ELSE unread_a + 1 END,
            unread_b = CASE WHEN participant_b = $2 THEN 0 ELSE unread_b + 1 END
        WHERE id = $1
        RETURNING id, participant_a, participant_b, participants_key, participant_meta,
                  last_message_preview, last_message_at, last_sender_id,
                  unread_a, unread_b, created_at, updated_at
        "#,
    )
    .bind(thread_id)
    .bind(sender_id)
    .bind(preview)
    .bind(sent_at)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| thread_from_row(&r)))
}

/// Zero a participant's unread counter.
///
/// Participation is enforced in the WHERE clause, so outsiders (and unknown
/// threads) both come back as `None`. Repeat calls are no-ops.
pub async fn clear_unread_count(
    pool: &PgPool,
    thread_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Thread>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        UPDATE threads SET
            unread_a = CASE WHEN participant_a = $2 THEN 0 ELSE unread_a END,
            unread_b = CASE WHEN participant_b = $2 THEN 0 ELSE unread_b END
        WHERE id = $1 AND (participant_a = $2 OR participant_b = $2)
        RETURNING id, participant_a, participant_b, participants_key, participant_meta,
                  last_message_preview, last_message_at, last_sender_id,
                  unread_a, unread_b, created_at, updated_at
        "#,
    )
    .bind(thread_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| thread_from_row(&r)))
}

/// Fetch a page of messages, most recent first.
///
/// The compound `(created_at, id)` cursor bound keeps pages stable when
/// messages share a timestamp. Callers over-fetch by one row to detect
/// whether more history exists.
pub async fn list_messages_before(
    pool: &PgPool,
    thread_id: Uuid,
    before: Option<MessageCursor>,
    limit: i64,
) -> Result<Vec<Message>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, thread_id, sender_id, recipient_id,
               content, attachments, read_at, created_at
        FROM messages
        WHERE thread_id = $1
          AND ($2::timestamptz IS NULL OR (created_at, id) < ($2::timestamptz, $3::uuid))
        ORDER BY created_at DESC, id DESC
        LIMIT $4
        "#,
    )
    .bind(thread_id)
    .bind(before.map(|c| c.created_at))
    .bind(before.map(|c| c.id))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(message_from_row).collect())
}

/// Get a user's registered device token, if any
pub async fn get_device_token(pool: &PgPool, user_id: Uuid) -> Result<Option<String>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT token FROM device_tokens WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.get("token")))
}
