//! Login and logout handlers.
//!
//! `login` authenticates, probes the session with a user listing, and
//! caches the token on disk. `logout` discards the cached token.

use secrecy::SecretString;
use tracing::debug;

use rollcall_api::RegistryClient;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config;
use crate::error::CliError;

use super::util;

pub async fn login(
    client: RegistryClient,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let email = match args.email {
        Some(email) => email,
        None => util::prompt_line("Email")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => util::prompt_password("Password: ")?,
    };

    let token = client
        .authenticate(&email, &SecretString::from(password))
        .await?;

    // Probe the session before caching: a token the admin endpoints
    // reject is useless, better to find out now.
    let users = client.list_users(&token).await?;
    debug!(users = users.len(), "session probe succeeded");

    config::save_token(&token)?;

    if !global.quiet {
        eprintln!("Logged in as {email}");
    }
    Ok(())
}

pub fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    config::clear_token()?;
    if !global.quiet {
        eprintln!("Logged out");
    }
    Ok(())
}
