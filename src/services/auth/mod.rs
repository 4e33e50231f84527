pub mod claims;
pub mod factory;
pub mod token_service;

pub use claims::{ClaimError, IdentityClaim, TokenClaims};
pub use factory::build_token_service;
pub use token_service::{TokenError, TokenService};
