// Tracing initialization for the admin tool.
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Maps a configured level name onto a filter directive, falling back to
/// `info` for anything unrecognised.
pub fn normalize_level(level: &str) -> &'static str {
    let wanted = level.trim();
    LEVELS
        .iter()
        .find(|known| known.eq_ignore_ascii_case(wanted))
        .copied()
        .unwrap_or("info")
}

pub fn init_tracing_with_level(level: &str) {
    // Prefer RUST_LOG from env, otherwise use the normalized level.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(normalize_level(level)));

    // stdout carries tokens and claims; diagnostics go to stderr.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_are_case_insensitive() {
        assert_eq!(normalize_level("DEBUG"), "debug");
        assert_eq!(normalize_level("Warn"), "warn");
        assert_eq!(normalize_level(" trace "), "trace");
        assert_eq!(normalize_level("error"), "error");
    }

    #[test]
    fn unknown_levels_fall_back_to_info() {
        assert_eq!(normalize_level("verbose"), "info");
        assert_eq!(normalize_level(""), "info");
        assert_eq!(normalize_level("sigil=debug"), "info");
    }
}
