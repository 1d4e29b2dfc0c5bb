//! Token issuance and verification configuration.
//!
//! # Example (TOML)
//!
//! ```toml
//! [tokens]
//! access_token_lifetime = "15m"
//! refresh_token_lifetime = "30days"
//!
//! [tokens.signing]
//! mode = "asymmetric"
//! algorithm = "RS256"
//! private_key_path = "keys/private.pem"
//! public_key_path = "keys/public.pem"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::key::{AlgorithmFamily, SigningAlgorithm};

/// Root token configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Access token lifetime.
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,

    /// Refresh token lifetime.
    #[serde(with = "humantime_serde")]
    pub refresh_token_lifetime: Duration,

    /// Key material configuration.
    pub signing: SigningConfig,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_lifetime: Duration::from_secs(15 * 60), // 15 minutes
            refresh_token_lifetime: Duration::from_secs(720 * 3600), // 30 days
            signing: SigningConfig::default(),
        }
    }
}

/// Which kind of trust root is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    /// RSA key pair.
    #[default]
    Asymmetric,
    /// Shared HMAC secret.
    Symmetric,
}

/// Key material configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Asymmetric or symmetric mode.
    pub mode: KeyMode,

    /// Signing algorithm.
    /// Supported: "RS256", "RS384", "RS512" (asymmetric), "HS256", "HS384", "HS512" (symmetric)
    pub algorithm: String,

    /// PEM private key. Only issuers need it.
    pub private_key_path: Option<PathBuf>,

    /// PEM public key. Derived from the private key when omitted.
    pub public_key_path: Option<PathBuf>,

    /// Shared secret for symmetric mode.
    /// Prefer SIGIL__TOKENS__SIGNING__SECRET over writing it to a file.
    pub secret: Option<String>,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            mode: KeyMode::Asymmetric,
            algorithm: "RS256".to_string(),
            private_key_path: None,
            public_key_path: None,
            secret: None,
        }
    }
}

impl SigningConfig {
    /// Returns a copy safe to print, with the secret replaced.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            secret: self.secret.as_ref().map(|_| "<redacted>".to_string()),
            ..self.clone()
        }
    }
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("mode", &self.mode)
            .field("algorithm", &self.algorithm)
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// A required configuration value is missing.
    #[error("Missing required configuration: {0}")]
    Missing(String),
}

impl TokenConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - A token lifetime is shorter than one second
    /// - The signing algorithm is unknown or does not match the mode
    /// - The shared secret is empty
    ///
    /// Returns `ConfigError::Missing` if the selected mode lacks its key
    /// source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_lifetime.as_secs() == 0 {
            return Err(ConfigError::InvalidValue(
                "access_token_lifetime must be at least 1s".to_string(),
            ));
        }
        if self.refresh_token_lifetime.as_secs() == 0 {
            return Err(ConfigError::InvalidValue(
                "refresh_token_lifetime must be at least 1s".to_string(),
            ));
        }

        let signing = &self.signing;
        let algorithm = SigningAlgorithm::from_name(&signing.algorithm).ok_or_else(|| {
            ConfigError::InvalidValue(format!(
                "Invalid signing algorithm: '{}'. Must be one of RS256, RS384, RS512, HS256, HS384, HS512",
                signing.algorithm
            ))
        })?;

        match signing.mode {
            KeyMode::Asymmetric => {
                if algorithm.family() != AlgorithmFamily::Rsa {
                    return Err(ConfigError::InvalidValue(format!(
                        "signing algorithm {} requires symmetric mode",
                        algorithm
                    )));
                }
                if signing.private_key_path.is_none() && signing.public_key_path.is_none() {
                    return Err(ConfigError::Missing(
                        "signing.private_key_path or signing.public_key_path".to_string(),
                    ));
                }
            }
            KeyMode::Symmetric => {
                if algorithm.family() != AlgorithmFamily::Hmac {
                    return Err(ConfigError::InvalidValue(format!(
                        "signing algorithm {} requires asymmetric mode",
                        algorithm
                    )));
                }
                match signing.secret.as_deref() {
                    None => return Err(ConfigError::Missing("signing.secret".to_string())),
                    Some("") => {
                        return Err(ConfigError::InvalidValue(
                            "signing.secret cannot be empty".to_string(),
                        ));
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }
}
