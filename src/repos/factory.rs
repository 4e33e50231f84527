/// Factory: build the catalog / booking repositories from `StorageConfig`.
///
/// PostgreSQL: one lazily connected pool per process, shared by both repos,
/// with migrations applied before the server starts accepting requests.
use std::sync::Arc;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::config::{DatabaseConfig, StorageConfig};
use crate::repos::{
    BookingRepo, MemoryBookingRepo, MemoryServiceRepo, PgBookingRepo, PgServiceRepo, ServiceRepo,
    error::RepoError,
};

#[derive(Clone)]
pub struct Repos {
    pub services: Arc<dyn ServiceRepo>,
    pub bookings: Arc<dyn BookingRepo>,
}

pub async fn build_repos(storage: &StorageConfig) -> Result<Repos, RepoError> {
    match storage {
        StorageConfig::Postgres(db) => {
            let pool = PgPoolOptions::new()
                .max_connections(db.max_connections)
                .connect_lazy_with(connect_options(db)?);

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!(host = %db.host, database = %db.name, "postgres storage ready");

            Ok(Repos {
                services: Arc::new(PgServiceRepo::new(pool.clone())),
                bookings: Arc::new(PgBookingRepo::new(pool)),
            })
        }
        StorageConfig::Memory => {
            tracing::warn!("using in-memory storage; data is lost on restart");
            Ok(Repos {
                services: Arc::new(MemoryServiceRepo::new()),
                bookings: Arc::new(MemoryBookingRepo::new()),
            })
        }
    }
}

fn connect_options(db: &DatabaseConfig) -> Result<PgConnectOptions, RepoError> {
    if let Some(url) = &db.url {
        return Ok(url.parse::<PgConnectOptions>()?);
    }

    // Built field by field so credentials never need URL escaping.
    Ok(PgConnectOptions::new()
        .host(&db.host)
        .port(db.port)
        .username(&db.user)
        .password(&db.password)
        .database(&db.name))
}
