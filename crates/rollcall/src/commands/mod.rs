//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod auth;
pub mod export;
pub mod students;
pub mod util;

use rollcall_api::RegistryClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: RegistryClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(client, args, global).await,
        Command::Students(args) => students::handle(client, args, global).await,
        Command::Export(args) => export::handle(client, args, global).await,
        // Logout is handled before dispatch; it needs no client
        Command::Logout => unreachable!(),
    }
}
