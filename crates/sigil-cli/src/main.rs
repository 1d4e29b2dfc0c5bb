use anyhow::{Result, anyhow};
use clap::Parser;

use sigil_cli::cli::{Cli, Commands, IssueCommands};
use sigil_cli::config::loader;
use sigil_cli::output::{print_error, print_field, print_json, print_success};
use sigil_cli::{commands, observability};

fn main() {
    if let Err(e) = run() {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let app = loader::load_config(Some(&cli.config)).map_err(|e| anyhow!(e))?;

    let level = cli.log_level.as_deref().unwrap_or(&app.logging.level);
    observability::init_tracing_with_level(level);
    tracing::debug!(config = %cli.config, "configuration loaded");

    match &cli.command {
        Commands::Keygen(args) => {
            let files = commands::keygen::keygen(&args.out_dir, args.bits, args.force)?;
            print_success(&format!(
                "Wrote {} and {}",
                files.private_key.display(),
                files.public_key.display()
            ));
        }
        Commands::Issue(args) => match &args.command {
            IssueCommands::Access(access) => {
                let token = commands::issue::access(&app.tokens, access.subject, &access.role)?;
                println!("{token}");
            }
            IssueCommands::Refresh(refresh) => {
                let token = commands::issue::refresh(&app.tokens, refresh.subject)?;
                println!("{token}");
            }
            IssueCommands::Pair(access) => {
                let pair = commands::issue::pair(&app.tokens, access.subject, &access.role)?;
                print_json(&pair)?;
            }
        },
        Commands::Verify(args) => {
            let claims =
                commands::verify::verify(&app.tokens, &args.token, args.kind.map(Into::into))?;
            print_json(&claims)?;
        }
        Commands::Config => {
            print_field("Config file", &cli.config);
            print_json(&app.redacted())?;
            app.validate().map_err(|e| anyhow!(e))?;
            print_success("Configuration is valid");
        }
    }

    Ok(())
}
