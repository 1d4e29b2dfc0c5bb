//! Claim shapes and the claim-map codec.
//!
//! Tokens carry their claims as a JSON object. This module defines the typed
//! records for both token kinds and the pure mapping between those records
//! and the generic map that gets signed:
//!
//! | key          | access | refresh |
//! |--------------|--------|---------|
//! | `token_type` | `"access"` | `"refresh"` |
//! | `user_id`    | yes    | yes     |
//! | `role`       | yes    | never   |
//! | `jti`        | yes    | yes     |
//! | `iat`, `exp` | yes    | yes     |
//!
//! A refresh token proves identity only, so its map never carries `role`. A
//! refresh map that does is rejected rather than silently ignored.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TokenError;

/// Claim map representation carried inside a token.
pub type ClaimMap = Map<String, Value>;

const TOKEN_TYPE: &str = "token_type";
const USER_ID: &str = "user_id";
const ROLE: &str = "role";
const JTI: &str = "jti";
const IAT: &str = "iat";
const EXP: &str = "exp";

/// The two kinds of token the issuer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential carrying identity and role.
    Access,
    /// Long-lived credential carrying identity only.
    Refresh,
}

impl TokenKind {
    /// Returns the value stored under `token_type`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }

    fn from_claim(value: &str) -> Option<Self> {
        match value {
            "access" => Some(Self::Access),
            "refresh" => Some(Self::Refresh),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Claims of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject identity.
    pub subject_id: i64,
    /// Authorization role.
    pub role: String,
    /// Unique token identifier.
    pub token_id: String,
    /// Issued at (Unix timestamp).
    pub issued_at: i64,
    /// Expiration time (Unix timestamp).
    pub expires_at: i64,
}

/// Claims of a refresh token. There is deliberately no role field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject identity.
    pub subject_id: i64,
    /// Unique token identifier.
    pub token_id: String,
    /// Issued at (Unix timestamp).
    pub issued_at: i64,
    /// Expiration time (Unix timestamp).
    pub expires_at: i64,
}

/// Validated claims of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Claims {
    /// Access token claims.
    Access(AccessClaims),
    /// Refresh token claims.
    Refresh(RefreshClaims),
}

impl Claims {
    /// Returns the token kind.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Access(_) => TokenKind::Access,
            Self::Refresh(_) => TokenKind::Refresh,
        }
    }

    /// Returns the subject identity.
    #[must_use]
    pub fn subject_id(&self) -> i64 {
        match self {
            Self::Access(c) => c.subject_id,
            Self::Refresh(c) => c.subject_id,
        }
    }

    /// Returns the role, present on access tokens only.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        match self {
            Self::Access(c) => Some(&c.role),
            Self::Refresh(_) => None,
        }
    }

    /// Returns the unique token identifier.
    #[must_use]
    pub fn token_id(&self) -> &str {
        match self {
            Self::Access(c) => &c.token_id,
            Self::Refresh(c) => &c.token_id,
        }
    }

    /// Returns the issuance timestamp.
    #[must_use]
    pub fn issued_at(&self) -> i64 {
        match self {
            Self::Access(c) => c.issued_at,
            Self::Refresh(c) => c.issued_at,
        }
    }

    /// Returns the expiration timestamp.
    #[must_use]
    pub fn expires_at(&self) -> i64 {
        match self {
            Self::Access(c) => c.expires_at,
            Self::Refresh(c) => c.expires_at,
        }
    }

    /// Returns `true` if the claims are expired at `now` (Unix seconds).
    /// A token is still valid at exactly its expiration second.
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires_at()
    }
}

/// Encodes typed claims into the map that gets signed.
#[must_use]
pub fn encode_claims(claims: &Claims) -> ClaimMap {
    let mut map = ClaimMap::new();
    map.insert(TOKEN_TYPE.into(), Value::from(claims.kind().as_str()));
    map.insert(USER_ID.into(), Value::from(claims.subject_id()));
    if let Claims::Access(access) = claims {
        map.insert(ROLE.into(), Value::from(access.role.as_str()));
    }
    map.insert(JTI.into(), Value::from(claims.token_id()));
    map.insert(IAT.into(), Value::from(claims.issued_at()));
    map.insert(EXP.into(), Value::from(claims.expires_at()));
    map
}

/// Decodes a claim map into typed claims.
///
/// The kind comes from `token_type`; the remaining keys must be consistent
/// with it. Unknown keys are ignored.
///
/// # Errors
/// Returns `TokenError::MalformedClaims` if a required claim is missing or
/// mistyped, `token_type` is unknown, an access map lacks `role`, a refresh
/// map carries `role`, or `exp` precedes `iat`.
pub fn decode_claims(map: &ClaimMap) -> Result<Claims, TokenError> {
    let kind_name = required_str(map, TOKEN_TYPE)?;
    let kind = TokenKind::from_claim(kind_name).ok_or_else(|| {
        TokenError::malformed_claims(format!("unknown token_type '{kind_name}'"))
    })?;

    let subject_id = required_i64(map, USER_ID)?;
    let token_id = required_str(map, JTI)?.to_string();
    let issued_at = required_i64(map, IAT)?;
    let expires_at = required_i64(map, EXP)?;

    if expires_at < issued_at {
        return Err(TokenError::malformed_claims("exp precedes iat"));
    }

    match kind {
        TokenKind::Access => Ok(Claims::Access(AccessClaims {
            subject_id,
            role: required_str(map, ROLE)?.to_string(),
            token_id,
            issued_at,
            expires_at,
        })),
        TokenKind::Refresh => {
            if map.contains_key(ROLE) {
                return Err(TokenError::malformed_claims(
                    "refresh token must not carry a role",
                ));
            }
            Ok(Claims::Refresh(RefreshClaims {
                subject_id,
                token_id,
                issued_at,
                expires_at,
            }))
        }
    }
}

fn required<'a>(map: &'a ClaimMap, key: &str) -> Result<&'a Value, TokenError> {
    map.get(key)
        .ok_or_else(|| TokenError::malformed_claims(format!("missing required claim '{key}'")))
}

fn required_i64(map: &ClaimMap, key: &str) -> Result<i64, TokenError> {
    required(map, key)?
        .as_i64()
        .ok_or_else(|| TokenError::malformed_claims(format!("claim '{key}' must be an integer")))
}

fn required_str<'a>(map: &'a ClaimMap, key: &str) -> Result<&'a str, TokenError> {
    required(map, key)?
        .as_str()
        .ok_or_else(|| TokenError::malformed_claims(format!("claim '{key}' must be a string")))
}
