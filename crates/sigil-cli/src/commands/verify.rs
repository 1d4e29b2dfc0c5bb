use anyhow::{Context, Result};
use sigil_token::{Claims, TokenConfig, TokenError, TokenKind, TokenVerifier};

/// Verifies `token` and returns its claims, optionally requiring a kind.
pub fn verify(config: &TokenConfig, token: &str, kind: Option<TokenKind>) -> Result<Claims> {
    let verifier =
        TokenVerifier::from_config(config).context("Failed to initialize token verifier")?;

    let token = token.trim();
    let result = match kind {
        None => verifier.parse_token(token),
        Some(TokenKind::Access) => verifier.parse_access_token(token).map(Claims::Access),
        Some(TokenKind::Refresh) => verifier.parse_refresh_token(token).map(Claims::Refresh),
    };

    result.map_err(|err: TokenError| {
        tracing::warn!(category = %err.category(), error = %err, "token rejected");
        anyhow::Error::new(err).context("Token rejected")
    })
}
