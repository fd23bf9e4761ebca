//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` / API failures into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use rollcall_core::CoreError;

/// Exit codes, scripting contract of the binary.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("No registry server configured")]
    #[diagnostic(
        code(rollcall::no_server),
        help(
            "Pass --server <URL>, set ROLLCALL_SERVER, or add\n\
             `server = \"https://registry.example.edu\"` to {path}"
        )
    )]
    NoServer { path: String },

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(rollcall::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration error")]
    #[diagnostic(
        code(rollcall::config),
        help("Check the config file syntax and ROLLCALL_* environment variables.")
    )]
    Config(#[from] figment::Error),

    // ── Authentication / session ─────────────────────────────────────
    #[error("Not logged in")]
    #[diagnostic(
        code(rollcall::not_logged_in),
        help("Run: rollcall login <EMAIL>")
    )]
    NotLoggedIn,

    #[error("Session expired: the cached token was rejected")]
    #[diagnostic(
        code(rollcall::session_expired),
        help("The token has been cleared. Run: rollcall login <EMAIL>")
    )]
    SessionExpired,

    #[error("Login failed: {detail}")]
    #[diagnostic(
        code(rollcall::auth_failed),
        help("Check the email and password; accounts are created with `rollcall students add`.")
    )]
    AuthFailed { detail: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Student {id} not found")]
    #[diagnostic(
        code(rollcall::not_found),
        help("Run: rollcall students list to see current records")
    )]
    StudentNotFound { id: i64 },

    // ── Remote / transport ───────────────────────────────────────────
    #[error("Could not reach the registry server")]
    #[diagnostic(
        code(rollcall::connection_failed),
        help("Check that the backend is running and the --server URL is correct.")
    )]
    ConnectionFailed {
        #[source]
        source: rollcall_api::Error,
    },

    #[error("The server rejected the request: {message}")]
    #[diagnostic(code(rollcall::api_error))]
    Api { message: String },

    // ── Export ───────────────────────────────────────────────────────
    #[error("Nothing to export: the registry is empty")]
    #[diagnostic(
        code(rollcall::empty_export),
        help("Register students first, then export.")
    )]
    EmptyExport,

    #[error("Export failed: {0}")]
    #[diagnostic(code(rollcall::export_failed))]
    Export(rollcall_export::ExportError),

    // ── Local I/O ────────────────────────────────────────────────────
    #[error("I/O error: {0}")]
    #[diagnostic(code(rollcall::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Exit code for the process, one variant class per code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoServer { .. } | Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            Self::NotLoggedIn | Self::SessionExpired | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::StudentNotFound { .. } => exit_code::NOT_FOUND,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<rollcall_api::Error> for CliError {
    fn from(err: rollcall_api::Error) -> Self {
        use rollcall_api::Error as ApiError;
        match err {
            ApiError::SessionExpired => Self::SessionExpired,
            ApiError::Auth { detail, .. } => Self::AuthFailed { detail },
            e @ (ApiError::Transport(_) | ApiError::Tls(_)) => {
                Self::ConnectionFailed { source: e }
            }
            e => Self::Api {
                message: e.to_string(),
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(e) => e.into(),
            CoreError::Validation { field, reason } => Self::Validation { field, reason },
            CoreError::NoIntent => Self::Api {
                message: CoreError::NoIntent.to_string(),
            },
        }
    }
}

impl From<rollcall_export::ExportError> for CliError {
    fn from(err: rollcall_export::ExportError) -> Self {
        match err {
            rollcall_export::ExportError::EmptySnapshot => Self::EmptyExport,
            e => Self::Export(e),
        }
    }
}
