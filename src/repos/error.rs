/**
 * Responsibility
 * - What the storage layer reports upward
 * - Callers turn every variant into a sanitized 500 (see AppError)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
