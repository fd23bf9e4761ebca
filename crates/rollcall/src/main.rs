mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rollcall_api::RegistryClient;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        // A rejected token is dead; drop it so the next command prompts
        // for login instead of failing the same way.
        if matches!(err, CliError::SessionExpired) {
            let _ = config::clear_token();
        }
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Logout only touches the local token cache
        Command::Logout => commands::auth::logout(&cli.global),

        // Everything else talks to the registry backend
        cmd => {
            let file_config = config::load_config()?;
            let server = config::resolve_server(&cli.global, &file_config)?;
            let transport = config::resolve_transport(&cli.global, &file_config);
            let client = RegistryClient::new(server, &transport)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, client, &cli.global).await
        }
    }
}
