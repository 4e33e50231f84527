/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the verified token claims (AuthCtx) to handlers behind the access guard
 * - axum-specific code lives in core; the type itself lives in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
