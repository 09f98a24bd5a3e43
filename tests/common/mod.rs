//! Common test utilities and helpers
//!
//! Database fixtures and collaborator stubs shared across integration
//! tests. Database-backed tests skip gracefully when `DATABASE_URL` is not
//! set so the suite stays runnable without a local Postgres.

#![allow(dead_code)]

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use chatline::backend::directory::ParticipantDirectory;
use chatline::shared::messaging::ParticipantProfile;
use chatline::shared::MessagingError;

/// Test database fixture
///
/// Connects using `DATABASE_URL`, runs migrations, and truncates the
/// messaging tables so each test starts clean. Combine with `#[serial]`
/// since the tables are shared.
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Connect to the test database, or `None` when `DATABASE_URL` is unset.
    pub async fn connect() -> Option<Self> {
        let database_url = std::env::var("DATABASE_URL").ok()?;

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        sqlx::query("TRUNCATE TABLE messages, threads, users, device_tokens CASCADE")
            .execute(&pool)
            .await
            .expect("Failed to clean test data");

        Some(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a user row for the directory to resolve
    pub async fn create_user(&self, display_name: &str) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, display_name) VALUES ($1, $2)")
            .bind(id)
            .bind(display_name)
            .execute(&self.pool)
            .await
            .expect("Failed to insert user");
        id
    }

    /// Register a device token for push lookup
    pub async fn register_device_token(&self, user_id: Uuid, token: &str) {
        sqlx::query(
            "INSERT INTO device_tokens (user_id, token, updated_at) VALUES ($1, $2, now())",
        )
        .bind(user_id)
        .bind(token)
        .execute(&self.pool)
        .await
        .expect("Failed to insert device token");
    }

    /// Count rows in a table, for persistence assertions
    pub async fn count_rows(&self, table: &str) -> i64 {
        let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count rows");
        row.0
    }
}

/// Directory stub returning a fixed set of profiles
pub struct StaticDirectory(pub Vec<ParticipantProfile>);

#[async_trait]
impl ParticipantDirectory for StaticDirectory {
    async fn resolve(&self, user_ids: &[Uuid]) -> Result<Vec<ParticipantProfile>, MessagingError> {
        Ok(self
            .0
            .iter()
            .filter(|p| user_ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

/// Profile fixture for [`StaticDirectory`]
pub fn profile(id: Uuid, name: &str) -> ParticipantProfile {
    ParticipantProfile {
        id,
        display_name: name.to_string(),
        avatar_url: None,
    }
}
