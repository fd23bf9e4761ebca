// Registry HTTP client
//
// Wraps `reqwest::Client` with registry-specific URL construction, the
// bearer-token header, and FastAPI-style `{detail}` error unwrapping.
// Every call is a single request/response; nothing is cached here.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::model::{AccessToken, NewStudent, StudentRecord, StudentUpdate, UserRecord};
use crate::transport::TransportConfig;

/// Error body shape used by the backend: `{"detail": "..."}`.
///
/// `detail` can also be a validation-error array, so it is kept as a raw
/// value and stringified for display.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Registration body: the mutable student fields plus email and password.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    email: &'a str,
    last_name: &'a str,
    first_name: &'a str,
    middle_initial: &'a str,
    course: &'a str,
    year: u32,
    gender: &'a str,
    graduating: bool,
    password: &'a str,
}

/// Token exchange response from `POST /token`.
#[derive(serde::Deserialize)]
struct TokenBody {
    access_token: String,
}

/// Async client for the student registry backend.
///
/// Stateless: holds only the HTTP client and base URL. Authenticated
/// calls take an [`AccessToken`] from the caller and attach it as a
/// bearer header; this client never stores or refreshes tokens.
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RegistryClient {
    /// Create a client from a base URL and transport settings.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wrap an existing `reqwest::Client` (used by tests and callers that
    /// manage their own transport).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join a path onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Student operations ───────────────────────────────────────────

    /// Fetch the full student listing.
    ///
    /// The caller must not touch its local snapshot when this fails —
    /// the error carries the HTTP status, nothing partial is returned.
    pub async fn list_students(&self, token: &AccessToken) -> Result<Vec<StudentRecord>, Error> {
        let url = self.url("admin/students")?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .bearer_auth(token.expose())
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return parse_json(resp).await;
        }
        Err(match status {
            StatusCode::UNAUTHORIZED => Error::SessionExpired,
            _ => Error::Fetch {
                status: status.as_u16(),
            },
        })
    }

    /// Register a new student. The payload's password is forwarded as-is;
    /// length policy is enforced upstream before this call is made.
    pub async fn create_student(
        &self,
        token: &AccessToken,
        student: &NewStudent,
    ) -> Result<(), Error> {
        let url = self.url("register")?;
        debug!("POST {url}");

        let body = RegisterBody {
            email: &student.email,
            last_name: &student.last_name,
            first_name: &student.first_name,
            middle_initial: &student.middle_initial,
            course: &student.course,
            year: student.year,
            gender: &student.gender,
            graduating: student.graduating,
            password: student.password.expose_secret(),
        };
        let resp = self
            .http
            .post(url)
            .bearer_auth(token.expose())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }
        let detail = read_detail(resp).await;
        Err(Error::Create {
            status: status.as_u16(),
            detail,
        })
    }

    /// Update the mutable fields of an existing record.
    pub async fn update_student(
        &self,
        token: &AccessToken,
        id: i64,
        update: &StudentUpdate,
    ) -> Result<(), Error> {
        let url = self.url(&format!("admin/students/{id}"))?;
        debug!("PUT {url}");

        let resp = self
            .http
            .put(url)
            .bearer_auth(token.expose())
            .json(update)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }
        let detail = read_detail(resp).await;
        Err(Error::Update {
            status: status.as_u16(),
            detail,
        })
    }

    /// Delete a record by id.
    pub async fn delete_student(&self, token: &AccessToken, id: i64) -> Result<(), Error> {
        let url = self.url(&format!("admin/students/{id}"))?;
        debug!("DELETE {url}");

        let resp = self
            .http
            .delete(url)
            .bearer_auth(token.expose())
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(match status {
            StatusCode::UNAUTHORIZED => Error::SessionExpired,
            _ => Error::Delete {
                status: status.as_u16(),
            },
        })
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Exchange credentials for a bearer token.
    ///
    /// The backend speaks the OAuth2 password flow: form-encoded
    /// `username`/`password`, JSON `{access_token}` back.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AccessToken, Error> {
        let url = self.url("token")?;
        debug!("POST {url}");

        let form = [("username", email), ("password", password.expose_secret())];
        let resp = self.http.post(url).form(&form).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = read_detail(resp).await;
            return Err(Error::Auth {
                status: status.as_u16(),
                detail,
            });
        }
        let body: TokenBody = parse_json(resp).await?;
        Ok(AccessToken::new(body.access_token))
    }

    /// Probe the session by listing users.
    ///
    /// A 401 here means the token is no longer good; callers clear their
    /// cached copy and send the user back through login.
    pub async fn list_users(&self, token: &AccessToken) -> Result<Vec<UserRecord>, Error> {
        let url = self.url("users")?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .bearer_auth(token.expose())
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return parse_json(resp).await;
        }
        Err(match status {
            StatusCode::UNAUTHORIZED => Error::SessionExpired,
            _ => Error::Fetch {
                status: status.as_u16(),
            },
        })
    }
}

// ── Response helpers ─────────────────────────────────────────────────

/// Deserialize a success body, keeping a preview of the raw text in the
/// error when it doesn't parse.
async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

/// Extract the `{detail}` message from an error body, falling back to the
/// raw text when the body isn't the expected shape.
async fn read_detail(resp: reqwest::Response) -> String {
    let raw = resp.text().await.unwrap_or_default();
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&raw) {
        match parsed.detail {
            Some(serde_json::Value::String(s)) => return s,
            Some(other) => return other.to_string(),
            None => {}
        }
    }
    if raw.is_empty() {
        "no error detail provided".into()
    } else {
        raw.chars().take(200).collect()
    }
}
