//! Shared helpers for command handlers.

use rollcall_api::AccessToken;

use crate::config;
use crate::error::CliError;

/// Load the cached session token, or fail with a login hint.
pub fn require_token() -> Result<AccessToken, CliError> {
    config::load_token().ok_or(CliError::NotLoggedIn)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Prompt for a line of input on the terminal.
pub fn prompt_line(message: &str) -> Result<String, CliError> {
    dialoguer::Input::new()
        .with_prompt(message)
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Prompt for a password without echo.
pub fn prompt_password(message: &str) -> Result<String, CliError> {
    Ok(rpassword::prompt_password(message)?)
}
