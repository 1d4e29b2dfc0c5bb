use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sigil_token::TokenKind;

#[derive(Parser)]
#[command(name = "sigil")]
#[command(about = "Sigil: issue and verify signed access and refresh tokens")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (overrides SIGIL_CONFIG env var)
    #[arg(short, long, global = true, env = "SIGIL_CONFIG", default_value = "sigil.toml")]
    pub config: String,

    /// Log level (overrides config; RUST_LOG wins over both)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an RSA key pair
    Keygen(KeygenArgs),
    /// Issue tokens
    Issue(IssueArgs),
    /// Verify a token and print its claims
    Verify(VerifyArgs),
    /// Show the effective configuration
    Config,
}

#[derive(clap::Args)]
pub struct KeygenArgs {
    /// Directory to write private.pem and public.pem into
    #[arg(long, default_value = "keys")]
    pub out_dir: PathBuf,
    /// RSA modulus size in bits
    #[arg(long, default_value_t = 2048)]
    pub bits: usize,
    /// Overwrite existing key files
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct IssueArgs {
    #[command(subcommand)]
    pub command: IssueCommands,
}

#[derive(Subcommand)]
pub enum IssueCommands {
    /// Issue an access token
    Access(AccessArgs),
    /// Issue a refresh token
    Refresh(RefreshArgs),
    /// Issue an access and a refresh token together
    Pair(AccessArgs),
}

#[derive(clap::Args)]
pub struct AccessArgs {
    /// Subject (user) ID
    #[arg(long, allow_negative_numbers = true)]
    pub subject: i64,
    /// Authorization role
    #[arg(long)]
    pub role: String,
}

#[derive(clap::Args)]
pub struct RefreshArgs {
    /// Subject (user) ID
    #[arg(long, allow_negative_numbers = true)]
    pub subject: i64,
}

#[derive(clap::Args)]
pub struct VerifyArgs {
    /// The token to verify
    pub token: String,
    /// Require a specific token kind
    #[arg(long)]
    pub kind: Option<KindArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Access,
    Refresh,
}

impl From<KindArg> for TokenKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Access => TokenKind::Access,
            KindArg::Refresh => TokenKind::Refresh,
        }
    }
}
