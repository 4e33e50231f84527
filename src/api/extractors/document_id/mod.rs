/**
 * Responsibility
 *  - Tie core and types together
 *  - Control what handlers can see
 */
mod core;
mod types;

pub use types::*;
