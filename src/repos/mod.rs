/*
 * Responsibility
 * - Storage seam for the catalog and booking collections
 * - Traits here, backends (PostgreSQL JSONB / in-memory) beside them
 */
pub mod booking_repo;
pub mod document;
pub mod error;
pub mod factory;
pub mod memory;
pub mod service_repo;

pub use booking_repo::{BookingRepo, PgBookingRepo, UpdateOutcome};
pub use document::{Document, StoredDocument};
pub use factory::{Repos, build_repos};
pub use memory::{MemoryBookingRepo, MemoryServiceRepo};
pub use service_repo::{PgServiceRepo, ServiceRepo};
