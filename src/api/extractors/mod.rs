pub mod auth_ctx;
pub mod document_id;
pub mod json_body;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use document_id::{BookingId, ServiceId};
pub use json_body::JsonBody;
