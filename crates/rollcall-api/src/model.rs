// ── Wire model for the registry API ──
//
// All bodies are camelCase JSON. `middleInitial` is nullable on the wire
// but never inside the process: null or absent collapses to "" at the
// deserialization boundary, so downstream rendering and export never see
// a null marker.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

/// A student record as returned by `GET /admin/students`.
///
/// `id` is server-assigned and unique; `email` is unique and immutable
/// once the record exists (the edit flow never sends it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: i64,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub middle_initial: String,
    pub course: String,
    pub year: u32,
    pub gender: String,
    pub graduating: bool,
}

/// Registration payload for `POST /register`.
///
/// Carries the plaintext password for the one call that needs it; the
/// secret never appears in `Debug` output.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_initial: String,
    pub course: String,
    pub year: u32,
    pub gender: String,
    pub graduating: bool,
    pub password: SecretString,
}

/// Update payload for `PUT /admin/students/{id}`.
///
/// Excludes `id`, `email`, and `password` — those are immutable after
/// creation as far as the edit flow is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdate {
    pub last_name: String,
    pub first_name: String,
    pub middle_initial: String,
    pub course: String,
    pub year: u32,
    pub gender: String,
    pub graduating: bool,
}

impl From<&StudentRecord> for StudentUpdate {
    fn from(record: &StudentRecord) -> Self {
        Self {
            last_name: record.last_name.clone(),
            first_name: record.first_name.clone(),
            middle_initial: record.middle_initial.clone(),
            course: record.course.clone(),
            year: record.year,
            gender: record.gender.clone(),
            graduating: record.graduating,
        }
    }
}

/// Opaque bearer token returned by `POST /token`.
///
/// Forwarded unmodified as `Authorization: Bearer …`; nothing in this
/// crate inspects its contents.
#[derive(Debug, Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// The raw token string, for header construction and persistence.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// Minimal record shape from `GET /users`.
///
/// The endpoint is only used as a post-login session/permission probe,
/// so everything beyond identity is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

fn empty_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
