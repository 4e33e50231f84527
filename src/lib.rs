//! Car repair catalog and booking ledger over HTTP.
//!
//! Bookings are listed only for the owner named by a signed bearer token;
//! see [`middleware::auth::access`].

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
