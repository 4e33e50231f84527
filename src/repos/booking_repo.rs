/*
 * Responsibility
 * - bookings CRUD over the `bookings` table (JSONB documents)
 * - Each call touches a single document; no multi-row transactions
 * - Only `status` is ever mutated after insert
 */
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use crate::repos::{
    document::{Document, StoredDocument},
    error::RepoError,
    service_repo::DocumentRow,
};

/// Result of a status update: how many documents matched the id, and how
/// many actually changed (an identical status counts as matched only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

#[async_trait]
pub trait BookingRepo: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    /// Bookings whose `email` equals `owner`, or every booking when `owner` is None.
    async fn list(&self, owner: Option<&str>) -> Result<Vec<StoredDocument>, RepoError>;

    /// Insert a booking and return its new id.
    async fn create(&self, body: Document) -> Result<Uuid, RepoError>;

    async fn update_status(&self, id: Uuid, status: Value) -> Result<UpdateOutcome, RepoError>;

    /// Returns the number of deleted documents (0 or 1).
    async fn delete(&self, id: Uuid) -> Result<u64, RepoError>;
}

#[derive(Debug, Clone)]
pub struct PgBookingRepo {
    pool: PgPool,
}

impl PgBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepo for PgBookingRepo {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self, owner: Option<&str>) -> Result<Vec<StoredDocument>, RepoError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, doc
            FROM bookings
            WHERE $1::text IS NULL OR doc->'email' = to_jsonb($1::text)
            ORDER BY created_at, id
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    async fn create(&self, body: Document) -> Result<Uuid, RepoError> {
        let stored = StoredDocument::new(Uuid::new_v4(), body);

        sqlx::query(
            r#"
            INSERT INTO bookings (id, doc)
            VALUES ($1, $2)
            "#,
        )
        .bind(stored.id)
        .bind(Json(&stored.body))
        .execute(&self.pool)
        .await?;

        Ok(stored.id)
    }

    async fn update_status(&self, id: Uuid, status: Value) -> Result<UpdateOutcome, RepoError> {
        // matched: the row exists; modified: the stored status actually differed
        let (matched, modified) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            WITH target AS (
                SELECT id, doc->'status' AS previous
                FROM bookings
                WHERE id = $1
                FOR UPDATE
            ), updated AS (
                UPDATE bookings AS b
                SET doc = jsonb_set(b.doc, '{status}', $2::jsonb, true)
                FROM target
                WHERE b.id = target.id
                  AND target.previous IS DISTINCT FROM $2::jsonb
                RETURNING b.id
            )
            SELECT
                (SELECT COUNT(*) FROM target) AS matched,
                (SELECT COUNT(*) FROM updated) AS modified
            "#,
        )
        .bind(id)
        .bind(Json(status))
        .fetch_one(&self.pool)
        .await?;

        Ok(UpdateOutcome {
            matched: matched as u64,
            modified: modified as u64,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
