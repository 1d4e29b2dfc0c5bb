//! Token error types.
//!
//! Every failure the core can produce is a [`TokenError`]. Key loading and
//! configuration errors are fatal at startup, signing errors indicate an
//! internal failure, and the remaining variants are the expected outcomes of
//! verifying a client-supplied token.

use std::fmt;

use crate::key::AlgorithmFamily;

/// Errors that can occur while loading keys, issuing or verifying tokens.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Key material could not be read or is not a well-formed key encoding.
    #[error("Failed to load key: {message}")]
    KeyLoad {
        /// Description of the load failure.
        message: String,
    },

    /// The signing capability failed to produce a signature.
    #[error("Failed to sign token: {message}")]
    Signing {
        /// Description of the signing failure.
        message: String,
    },

    /// Issuer or verifier construction received invalid settings.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The presented string is not a compact signed token.
    #[error("Malformed token: {message}")]
    MalformedToken {
        /// Description of the structural problem.
        message: String,
    },

    /// The token declares an algorithm outside the verifier's family.
    #[error("Algorithm mismatch: expected {expected} family, token declares '{found}'")]
    AlgorithmMismatch {
        /// The family the verifier was configured for.
        expected: AlgorithmFamily,
        /// The algorithm name found in the token header.
        found: String,
    },

    /// The token signature does not match its contents.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The claim map is missing fields or has the wrong shape for its kind.
    #[error("Malformed claims: {message}")]
    MalformedClaims {
        /// Description of why the claims are malformed.
        message: String,
    },

    /// The token has expired.
    #[error("Token expired")]
    Expired,

    /// A valid token of the wrong kind was presented.
    #[error("Unexpected token kind: expected {expected}, got {found}")]
    UnexpectedTokenKind {
        /// Kind the caller required.
        expected: crate::claims::TokenKind,
        /// Kind the token carries.
        found: crate::claims::TokenKind,
    },
}

impl TokenError {
    /// Creates a new `KeyLoad` error.
    #[must_use]
    pub fn key_load(message: impl Into<String>) -> Self {
        Self::KeyLoad {
            message: message.into(),
        }
    }

    /// Creates a new `Signing` error.
    #[must_use]
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `MalformedToken` error.
    #[must_use]
    pub fn malformed_token(message: impl Into<String>) -> Self {
        Self::MalformedToken {
            message: message.into(),
        }
    }

    /// Creates a new `MalformedClaims` error.
    #[must_use]
    pub fn malformed_claims(message: impl Into<String>) -> Self {
        Self::MalformedClaims {
            message: message.into(),
        }
    }

    /// Creates a new `AlgorithmMismatch` error.
    #[must_use]
    pub fn algorithm_mismatch(expected: AlgorithmFamily, found: impl Into<String>) -> Self {
        Self::AlgorithmMismatch {
            expected,
            found: found.into(),
        }
    }

    /// Returns `true` if the error is an expected outcome of verifying a
    /// client-supplied token. Callers map these to "unauthenticated".
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            Self::MalformedToken { .. }
                | Self::AlgorithmMismatch { .. }
                | Self::InvalidSignature
                | Self::MalformedClaims { .. }
                | Self::Expired
                | Self::UnexpectedTokenKind { .. }
        )
    }

    /// Returns `true` if this is a server-side failure.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::KeyLoad { .. } | Self::Signing { .. } | Self::Configuration { .. }
        )
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::KeyLoad { .. } => ErrorCategory::Key,
            Self::Signing { .. } => ErrorCategory::Internal,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::MalformedToken { .. }
            | Self::AlgorithmMismatch { .. }
            | Self::InvalidSignature
            | Self::MalformedClaims { .. }
            | Self::Expired
            | Self::UnexpectedTokenKind { .. } => ErrorCategory::Verification,
        }
    }
}

/// Categories of token errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Key loading failures.
    Key,
    /// Invalid issuer/verifier settings.
    Configuration,
    /// Unexpected internal failures.
    Internal,
    /// Rejected tokens.
    Verification,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => write!(f, "key"),
            Self::Configuration => write!(f, "configuration"),
            Self::Internal => write!(f, "internal"),
            Self::Verification => write!(f, "verification"),
        }
    }
}
