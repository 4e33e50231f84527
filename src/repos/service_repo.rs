/*
 * Responsibility
 * - Read access to the service catalog (`services` table)
 * - Catalog entries are never written through the API
 */
use async_trait::async_trait;
use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use crate::repos::{
    document::{Document, StoredDocument},
    error::RepoError,
};

#[async_trait]
pub trait ServiceRepo: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    /// Every catalog entry, oldest first.
    async fn list(&self) -> Result<Vec<StoredDocument>, RepoError>;

    async fn get(&self, id: Uuid) -> Result<Option<StoredDocument>, RepoError>;
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct DocumentRow {
    pub id: Uuid,
    pub doc: Json<Document>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        StoredDocument::new(row.id, row.doc.0)
    }
}

#[derive(Debug, Clone)]
pub struct PgServiceRepo {
    pool: PgPool,
}

impl PgServiceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepo for PgServiceRepo {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<StoredDocument>, RepoError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, doc
            FROM services
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<StoredDocument>, RepoError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, doc
            FROM services
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StoredDocument::from))
    }
}
