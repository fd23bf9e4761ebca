use thiserror::Error;

/// Error type for the core data layer.
///
/// API failures pass through unchanged; the variants added here are the
/// purely local failure modes (precondition checks, intent misuse).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A remote call was rejected or could not complete.
    #[error(transparent)]
    Api(#[from] rollcall_api::Error),

    /// A local precondition failed before any network call was made.
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// `submit` was called with no create/edit intent open.
    #[error("no create or edit intent is open")]
    NoIntent,
}

impl CoreError {
    /// Returns `true` if the cached bearer token should be discarded.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_auth_expired())
    }
}
