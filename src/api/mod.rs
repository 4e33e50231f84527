/*
 * Responsibility
 * - HTTP surface: routes, handlers, DTOs, extractors
 * - routes() is the only thing app.rs needs from here
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
