use serde::{Deserialize, Serialize};
use sigil_token::TokenConfig;

/// Top-level configuration of the admin tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tokens: TokenConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}
fn default_log_level() -> String {
    "info".into()
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.tokens.validate().map_err(|e| format!("tokens: {e}"))
    }

    /// Returns a copy safe to print.
    pub fn redacted(&self) -> Self {
        let mut cfg = self.clone();
        cfg.tokens.signing = cfg.tokens.signing.redacted();
        cfg
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    /// Merges the optional config file with `SIGIL__*` environment overrides.
    ///
    /// The token section is not validated here; `keygen` runs before any key
    /// exists and the token constructors validate on their own.
    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        let pathbuf = PathBuf::from(path.unwrap_or("sigil.toml"));
        if pathbuf.exists() {
            builder = builder.add_source(File::from(pathbuf));
        }
        // Environment variable overrides, e.g., SIGIL__TOKENS__SIGNING__SECRET=...
        builder = builder.add_source(
            Environment::with_prefix("SIGIL")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        cfg.try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))
    }
}
