//! # sigil-token
//!
//! Issuance and verification of signed, time-bounded access and refresh
//! tokens.
//!
//! ## Overview
//!
//! A deployment has one trust root, either an RSA key pair or a shared HMAC
//! secret. The issuer signs tokens with the private half; verifiers check them
//! with the public half. Access tokens carry a subject and a role; refresh
//! tokens carry the subject only.
//!
//! ## Modules
//!
//! - [`key`] - Key material and the signing/verifying capabilities
//! - [`claims`] - Claim shapes and the claim-map codec
//! - [`issuer`] - Token issuance
//! - [`verifier`] - Token verification
//! - [`config`] - Lifetimes and key source configuration
//! - [`error`] - Error taxonomy
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use sigil_token::prelude::*;
//!
//! let material = KeyMaterial::load_asymmetric(Some(private_path), Some(public_path))?;
//! let issuer = TokenIssuer::new(
//!     material.signing_key()?,
//!     Duration::from_secs(15 * 60),
//!     Duration::from_secs(720 * 3600),
//! )?;
//! let verifier = TokenVerifier::new(material.verifying_key()?);
//!
//! let token = issuer.generate_access_token(42, "admin")?;
//! let claims = verifier.parse_token(&token)?;
//! assert_eq!(claims.role(), Some("admin"));
//! ```

pub mod claims;
pub mod config;
pub mod error;
pub mod issuer;
pub mod key;
pub mod verifier;

pub use claims::{AccessClaims, ClaimMap, Claims, RefreshClaims, TokenKind};
pub use config::{ConfigError, KeyMode, SigningConfig, TokenConfig};
pub use error::{ErrorCategory, TokenError};
pub use issuer::{TokenIssuer, TokenPair};
pub use key::{
    AlgorithmFamily, GeneratedKeyPair, KeyMaterial, SigningAlgorithm, SigningKey, VerifyingKey,
};
pub use verifier::TokenVerifier;

/// Type alias for token results.
pub type TokenResult<T> = Result<T, TokenError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use sigil_token::prelude::*;
/// ```
pub mod prelude {
    pub use crate::TokenResult;
    pub use crate::claims::{AccessClaims, Claims, RefreshClaims, TokenKind};
    pub use crate::config::{ConfigError, KeyMode, SigningConfig, TokenConfig};
    pub use crate::error::{ErrorCategory, TokenError};
    pub use crate::issuer::{TokenIssuer, TokenPair};
    pub use crate::key::{AlgorithmFamily, KeyMaterial, SigningAlgorithm, SigningKey, VerifyingKey};
    pub use crate::verifier::TokenVerifier;
}
