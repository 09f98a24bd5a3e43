//! Participant Directory Adapter
//!
//! The user service owns profile data; this adapter resolves display
//! metadata for a set of user IDs. It is consulted exactly once per thread,
//! at creation, to capture the denormalized `participant_meta` snapshot.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::messaging::ParticipantProfile;
use crate::shared::MessagingError;

/// Lookup of display metadata for thread participants.
///
/// IDs with no directory entry are simply omitted from the result; the
/// directory is a display cache, not an authority on user existence.
#[async_trait]
pub trait ParticipantDirectory: Send + Sync {
    async fn resolve(&self, user_ids: &[Uuid]) -> Result<Vec<ParticipantProfile>, MessagingError>;
}

/// Directory backed by the user service's `users` table.
#[derive(Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantDirectory for PgDirectory {
    async fn resolve(&self, user_ids: &[Uuid]) -> Result<Vec<ParticipantProfile>, MessagingError> {
        let rows = sqlx::query(
            r#"
            SELECT id, display_name, avatar_url
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MessagingError::directory(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| ParticipantProfile {
                id: row.get("id"),
                display_name: row.get("display_name"),
                avatar_url: row.get("avatar_url"),
            })
            .collect())
    }
}
