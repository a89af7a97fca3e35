pub mod claims;
pub mod credential_validator;
pub mod error;
pub mod jwt_algorithm;
pub mod jwt_validator;
pub mod key_material;
pub mod principal;

pub use claims::Claims;
pub use credential_validator::CredentialValidator;
pub use error::{AuthError, Result};
pub use jwt_algorithm::JwtAlgorithm;
pub use jwt_validator::JwtValidator;
pub use key_material::KeyMaterialProvider;
pub use principal::Principal;

/// Default clock skew tolerance applied to credential expiry
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

#[cfg(test)]
mod tests;
