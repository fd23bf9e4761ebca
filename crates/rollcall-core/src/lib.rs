//! Data layer between `rollcall-api` and UI consumers.
//!
//! This crate owns the client-side state of the registry admin:
//!
//! - **[`RegistryStore`]** — a replace-only snapshot of the last successful
//!   student listing, behind `tokio::sync::watch` channels. The single
//!   source of truth for rendering and export; readers never observe a
//!   partially replaced snapshot.
//!
//! - **[`Registrar`]** — the mediator and sole writer of the store. All
//!   mutations go through the remote API, then resynchronize the snapshot
//!   wholesale; a failed call leaves the store at its last-known-good
//!   state. Pending create/edit work is modeled as an explicit intent
//!   state machine so a rejected submission can be retried.
//!
//! - **[`table`]** — pure projection of a snapshot into header + cell
//!   text. Both export formats and any table UI draw their values from
//!   here, so they cannot diverge.

pub mod error;
pub mod registrar;
pub mod store;
pub mod table;

pub use error::CoreError;
pub use registrar::{CreateIntent, EditIntent, IntentState, Registrar};
pub use store::RegistryStore;
pub use table::TableView;

// Re-export the wire model: consumers of this crate shouldn't need to
// depend on rollcall-api for the record types.
pub use rollcall_api::{AccessToken, NewStudent, StudentRecord, StudentUpdate};
