//! Token verification.
//!
//! [`TokenVerifier::parse_token`] evaluates a presented token from scratch on
//! every call, in this order:
//!
//! 1. Split the compact form and decode the header.
//! 2. Admit the declared algorithm only if it belongs to the verifier's
//!    family. The header is untrusted input, so this happens before any
//!    cryptographic work.
//! 3. Verify the signature.
//! 4. Decode the claim map into typed [`Claims`].
//! 5. Reject the token if it has expired.
//!
//! The first failing step decides the error; nothing is cached between calls.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;

use crate::claims::{AccessClaims, ClaimMap, Claims, RefreshClaims, TokenKind, decode_claims};
use crate::config::TokenConfig;
use crate::error::TokenError;
use crate::key::{KeyMaterial, VerifyingKey};

/// The subset of the token header the verifier reads.
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

/// Validates tokens against a verification key.
///
/// This type is `Send + Sync` and holds no mutable state.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    verifying_key: VerifyingKey,
}

impl TokenVerifier {
    /// Creates a new verifier.
    #[must_use]
    pub fn new(verifying_key: VerifyingKey) -> Self {
        Self { verifying_key }
    }

    /// Creates a verifier from configuration, loading the public key (or the
    /// shared secret).
    ///
    /// # Errors
    /// Returns `TokenError::Configuration` if the configuration is invalid
    /// and `TokenError::KeyLoad` if the key cannot be loaded.
    pub fn from_config(config: &TokenConfig) -> Result<Self, TokenError> {
        config
            .validate()
            .map_err(|e| TokenError::configuration(e.to_string()))?;
        let material = KeyMaterial::from_config(&config.signing)?;
        Ok(Self::new(material.verifying_key()?))
    }

    /// Returns the verification key.
    #[must_use]
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Validates `token` and returns its claims.
    ///
    /// # Errors
    /// Returns `MalformedToken`, `AlgorithmMismatch`, `InvalidSignature`,
    /// `MalformedClaims` or `Expired`, whichever check fails first.
    pub fn parse_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.parse_token_at(token, OffsetDateTime::now_utc())
    }

    /// Validates `token` as of `now`.
    ///
    /// # Errors
    /// See [`TokenVerifier::parse_token`].
    pub fn parse_token_at(&self, token: &str, now: OffsetDateTime) -> Result<Claims, TokenError> {
        let (message, signature) = token
            .rsplit_once('.')
            .ok_or_else(|| TokenError::malformed_token("expected three segments"))?;
        let (header_segment, claims_segment) = message
            .split_once('.')
            .ok_or_else(|| TokenError::malformed_token("expected three segments"))?;
        if claims_segment.contains('.') {
            return Err(TokenError::malformed_token("expected three segments"));
        }

        let header: RawHeader = decode_segment(header_segment)
            .map_err(|e| TokenError::malformed_token(format!("invalid header: {e}")))?;

        let algorithm = self.verifying_key.admit_algorithm(&header.alg)?;

        if !self
            .verifying_key
            .verify(algorithm, message.as_bytes(), signature)
        {
            return Err(TokenError::InvalidSignature);
        }

        let map: ClaimMap = decode_segment(claims_segment)
            .map_err(|e| TokenError::malformed_claims(format!("invalid claims segment: {e}")))?;
        let claims = decode_claims(&map)?;

        if claims.is_expired_at(now.unix_timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Validates `token` and requires it to be an access token.
    ///
    /// # Errors
    /// Everything [`TokenVerifier::parse_token`] returns, plus
    /// `UnexpectedTokenKind` for a valid refresh token.
    pub fn parse_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        match self.parse_token(token)? {
            Claims::Access(claims) => Ok(claims),
            other => Err(unexpected_kind(TokenKind::Access, &other)),
        }
    }

    /// Validates `token` and requires it to be a refresh token.
    ///
    /// # Errors
    /// Everything [`TokenVerifier::parse_token`] returns, plus
    /// `UnexpectedTokenKind` for a valid access token.
    pub fn parse_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        match self.parse_token(token)? {
            Claims::Refresh(claims) => Ok(claims),
            other => Err(unexpected_kind(TokenKind::Refresh, &other)),
        }
    }
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| e.to_string())?;
    serde_json::from_slice(&bytes).map_err(|e| e.to_string())
}

fn unexpected_kind(expected: TokenKind, claims: &Claims) -> TokenError {
    TokenError::UnexpectedTokenKind {
        expected,
        found: claims.kind(),
    }
}
