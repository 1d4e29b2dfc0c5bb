//! Token issuance.
//!
//! A [`TokenIssuer`] owns the signing capability and the lifetimes for both
//! token kinds. Tokens use the compact JWS form:
//! `base64url(header).base64url(claims).base64url(signature)`.

use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::Header;
use serde::Serialize;
use time::OffsetDateTime;

use crate::claims::{AccessClaims, Claims, RefreshClaims, encode_claims};
use crate::config::TokenConfig;
use crate::error::TokenError;
use crate::key::{KeyMaterial, SigningKey};

/// An access and a refresh token issued at the same instant.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
}

/// Produces signed access and refresh tokens.
///
/// This type is `Send + Sync` and holds no mutable state, so one instance can
/// be shared across threads.
#[derive(Debug)]
pub struct TokenIssuer {
    signing_key: SigningKey,
    access_ttl: i64,
    refresh_ttl: i64,
}

impl TokenIssuer {
    /// Creates a new issuer.
    ///
    /// # Errors
    /// Returns `TokenError::Configuration` if either lifetime is shorter than
    /// one second.
    pub fn new(
        signing_key: SigningKey,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, TokenError> {
        Ok(Self {
            signing_key,
            access_ttl: ttl_seconds("access", access_ttl)?,
            refresh_ttl: ttl_seconds("refresh", refresh_ttl)?,
        })
    }

    /// Creates an issuer from configuration, loading the private key.
    ///
    /// # Errors
    /// Returns `TokenError::Configuration` if the configuration is invalid
    /// and `TokenError::KeyLoad` if the key cannot be loaded.
    pub fn from_config(config: &TokenConfig) -> Result<Self, TokenError> {
        config
            .validate()
            .map_err(|e| TokenError::configuration(e.to_string()))?;
        let material = KeyMaterial::from_config(&config.signing)?;
        Self::new(
            material.signing_key()?,
            config.access_token_lifetime,
            config.refresh_token_lifetime,
        )
    }

    /// Returns the access token lifetime.
    #[must_use]
    pub fn access_ttl(&self) -> Duration {
        Duration::from_secs(self.access_ttl.unsigned_abs())
    }

    /// Returns the refresh token lifetime.
    #[must_use]
    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_ttl.unsigned_abs())
    }

    /// Issues an access token carrying `subject_id` and `role`.
    ///
    /// # Errors
    /// Returns `TokenError::Signing` if signing fails.
    pub fn generate_access_token(&self, subject_id: i64, role: &str) -> Result<String, TokenError> {
        self.generate_access_token_at(subject_id, role, OffsetDateTime::now_utc())
    }

    /// Issues an access token as of `now`.
    ///
    /// # Errors
    /// Returns `TokenError::Signing` if signing fails.
    pub fn generate_access_token_at(
        &self,
        subject_id: i64,
        role: &str,
        now: OffsetDateTime,
    ) -> Result<String, TokenError> {
        let issued_at = now.unix_timestamp();
        let claims = Claims::Access(AccessClaims {
            subject_id,
            role: role.to_string(),
            token_id: new_token_id(),
            issued_at,
            expires_at: expiry(issued_at, self.access_ttl)?,
        });
        self.sign(&claims)
    }

    /// Issues a refresh token carrying only `subject_id`.
    ///
    /// # Errors
    /// Returns `TokenError::Signing` if signing fails.
    pub fn generate_refresh_token(&self, subject_id: i64) -> Result<String, TokenError> {
        self.generate_refresh_token_at(subject_id, OffsetDateTime::now_utc())
    }

    /// Issues a refresh token as of `now`.
    ///
    /// # Errors
    /// Returns `TokenError::Signing` if signing fails.
    pub fn generate_refresh_token_at(
        &self,
        subject_id: i64,
        now: OffsetDateTime,
    ) -> Result<String, TokenError> {
        let issued_at = now.unix_timestamp();
        let claims = Claims::Refresh(RefreshClaims {
            subject_id,
            token_id: new_token_id(),
            issued_at,
            expires_at: expiry(issued_at, self.refresh_ttl)?,
        });
        self.sign(&claims)
    }

    /// Issues an access and a refresh token for the same subject.
    ///
    /// # Errors
    /// Returns `TokenError::Signing` if signing fails.
    pub fn generate_token_pair(&self, subject_id: i64, role: &str) -> Result<TokenPair, TokenError> {
        let now = OffsetDateTime::now_utc();
        Ok(TokenPair {
            access_token: self.generate_access_token_at(subject_id, role, now)?,
            refresh_token: self.generate_refresh_token_at(subject_id, now)?,
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.signing_key.algorithm().to_jwt_algorithm());
        let header_json =
            serde_json::to_vec(&header).map_err(|e| TokenError::signing(e.to_string()))?;
        let claims_json = serde_json::to_vec(&encode_claims(claims))
            .map_err(|e| TokenError::signing(e.to_string()))?;

        let message = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(claims_json)
        );
        let signature = self.signing_key.sign(message.as_bytes())?;

        tracing::debug!(
            subject_id = claims.subject_id(),
            kind = %claims.kind(),
            expires_at = claims.expires_at(),
            "Issued token"
        );

        Ok(format!("{message}.{signature}"))
    }
}

fn ttl_seconds(name: &str, ttl: Duration) -> Result<i64, TokenError> {
    if ttl.as_secs() == 0 {
        return Err(TokenError::configuration(format!(
            "{name} token lifetime must be at least one second"
        )));
    }
    i64::try_from(ttl.as_secs())
        .map_err(|_| TokenError::configuration(format!("{name} token lifetime is too large")))
}

fn expiry(issued_at: i64, ttl: i64) -> Result<i64, TokenError> {
    issued_at
        .checked_add(ttl)
        .ok_or_else(|| TokenError::signing("expiration time overflows"))
}

fn new_token_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
