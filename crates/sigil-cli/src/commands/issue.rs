use anyhow::{Context, Result};
use sigil_token::{TokenConfig, TokenIssuer, TokenPair};

fn issuer(config: &TokenConfig) -> Result<TokenIssuer> {
    TokenIssuer::from_config(config).context("Failed to initialize token issuer")
}

pub fn access(config: &TokenConfig, subject: i64, role: &str) -> Result<String> {
    let token = issuer(config)?
        .generate_access_token(subject, role)
        .context("Failed to issue access token")?;
    tracing::info!(subject, role, "issued access token");
    Ok(token)
}

pub fn refresh(config: &TokenConfig, subject: i64) -> Result<String> {
    let token = issuer(config)?
        .generate_refresh_token(subject)
        .context("Failed to issue refresh token")?;
    tracing::info!(subject, "issued refresh token");
    Ok(token)
}

pub fn pair(config: &TokenConfig, subject: i64, role: &str) -> Result<TokenPair> {
    let pair = issuer(config)?
        .generate_token_pair(subject, role)
        .context("Failed to issue token pair")?;
    tracing::info!(subject, role, "issued token pair");
    Ok(pair)
}
