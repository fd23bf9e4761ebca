use thiserror::Error;

/// Top-level error type for the `rollcall-api` crate.
///
/// One variant per registry operation that can be rejected by the server,
/// plus transport-level failures. `rollcall-core` maps these into
/// user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected (wrong credentials, unknown account).
    #[error("authentication failed (HTTP {status}): {detail}")]
    Auth { status: u16, detail: String },

    /// Bearer token rejected (HTTP 401). The cached token should be
    /// discarded and the user sent back through login.
    #[error("session expired or token rejected")]
    SessionExpired,

    // ── Registry operations ─────────────────────────────────────────
    /// Student listing failed with a non-success status.
    #[error("fetching students failed (HTTP {status})")]
    Fetch { status: u16 },

    /// Registration rejected. `detail` carries the server's `{detail}`
    /// body when one was provided (e.g. "Email already registered").
    #[error("registration rejected (HTTP {status}): {detail}")]
    Create { status: u16, detail: String },

    /// Update rejected for an existing record.
    #[error("update rejected (HTTP {status}): {detail}")]
    Update { status: u16, detail: String },

    /// Deletion rejected for an existing record.
    #[error("deletion rejected (HTTP {status})")]
    Delete { status: u16 },

    // ── Transport ───────────────────────────────────────────────────
    /// The request could not complete (connection refused, DNS failure,
    /// timeout). Distinct from a server rejection.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the cached bearer token should be invalidated
    /// and the user re-authenticated.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// The HTTP status the server answered with, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. }
            | Self::Fetch { status }
            | Self::Create { status, .. }
            | Self::Update { status, .. }
            | Self::Delete { status } => Some(*status),
            Self::SessionExpired => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
