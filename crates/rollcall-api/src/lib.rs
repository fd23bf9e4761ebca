//! Async REST client for the student registry backend.
//!
//! The backend exposes a small JSON API: a student listing under
//! `/admin/students`, registration via `/register`, OAuth2-style password
//! login via `/token`, and a `/users` probe for session verification. This
//! crate wraps those endpoints behind [`RegistryClient`], one request per
//! call, no retained server state.
//!
//! Authentication is a bearer token obtained from
//! [`RegistryClient::authenticate`]. The token is opaque — callers hold an
//! [`AccessToken`] and pass it to every authenticated call; the client
//! forwards it as an `Authorization` header without interpreting it.

pub mod client;
pub mod error;
pub mod model;
pub mod transport;

pub use client::RegistryClient;
pub use error::Error;
pub use model::{AccessToken, NewStudent, StudentRecord, StudentUpdate, UserRecord};
pub use transport::{TlsMode, TransportConfig};
