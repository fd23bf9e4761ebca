//! CLI-owned configuration: TOML file + environment, and the cached
//! session token on disk.
//!
//! Core never sees these types -- it receives a pre-built `TransportConfig`
//! and base URL.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use rollcall_api::{AccessToken, TlsMode, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Registry base URL (e.g., "https://registry.example.edu").
    pub server: Option<String>,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: None,
            insecure: false,
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

// ── Paths ────────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("edu", "rollcall", "rollcall")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| home_fallback(".config").join("config.toml"))
}

/// Resolve the cached token path under the platform data dir.
pub fn token_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("token"))
        .unwrap_or_else(|| home_fallback(".local/share").join("token"))
}

fn home_fallback(subdir: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(subdir);
    p.push("rollcall");
    p
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the config from file + environment (`ROLLCALL_*` overrides).
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("ROLLCALL_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Resolve the registry base URL: flag (or ROLLCALL_SERVER) > config file.
pub fn resolve_server(global: &GlobalOpts, config: &Config) -> Result<url::Url, CliError> {
    let raw = global
        .server
        .as_deref()
        .or(config.server.as_deref())
        .ok_or_else(|| CliError::NoServer {
            path: config_path().display().to_string(),
        })?;
    raw.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Translate global flags + config into a transport config.
pub fn resolve_transport(global: &GlobalOpts, config: &Config) -> TransportConfig {
    let tls = if global.insecure || config.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca) = config.ca_cert {
        TlsMode::CustomCa(ca.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(global.timeout.unwrap_or(config.timeout)),
    }
}

// ── Token cache ──────────────────────────────────────────────────────

/// Load the cached session token, if one exists.
pub fn load_token() -> Option<AccessToken> {
    let raw = fs::read_to_string(token_path()).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(AccessToken::new(trimmed))
}

/// Persist the session token under the data dir with owner-only permissions.
pub fn save_token(token: &AccessToken) -> Result<(), CliError> {
    let path = token_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, token.expose())?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

/// Remove the cached token. Missing file is not an error.
pub fn clear_token() -> Result<(), CliError> {
    match fs::remove_file(token_path()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_thirty_second_timeout() {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .extract()
            .unwrap();
        assert_eq!(config.timeout, 30);
        assert!(config.server.is_none());
        assert!(!config.insecure);
    }

    #[test]
    fn toml_string_round_trips() {
        let config: Config = Figment::new()
            .merge(Toml::string(
                r#"
                server = "https://registry.example.edu"
                insecure = true
                timeout = 5
                "#,
            ))
            .extract()
            .unwrap();
        assert_eq!(config.server.as_deref(), Some("https://registry.example.edu"));
        assert!(config.insecure);
        assert_eq!(config.timeout, 5);
    }
}
