// ── Edit/create mediator ──
//
// The only writer of the RegistryStore. Every mutation goes out through
// the API client and comes back into the store via a full resync; the
// store is never patched in place.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use rollcall_api::{AccessToken, NewStudent, RegistryClient, StudentUpdate};

use crate::error::CoreError;
use crate::store::RegistryStore;

/// Minimum password length enforced locally before registration is sent.
const MIN_PASSWORD_LEN: usize = 8;

/// A pending registration, before submission.
#[derive(Debug, Clone)]
pub struct CreateIntent {
    pub form: NewStudent,
}

/// A pending edit of an existing record, pre-filled from the snapshot.
///
/// Only the mutable fields are present; `id` pins the target record and
/// `email`/`password` are not part of the edit flow at all.
#[derive(Debug, Clone)]
pub struct EditIntent {
    pub id: i64,
    pub fields: StudentUpdate,
}

/// Lifecycle of the pending-intent slot.
///
/// `Closed -> Creating | Editing -> Submitting -> Closed` on success;
/// a rejected submission restores the intent so it can be corrected and
/// retried. Opening a new intent discards whatever was open.
#[derive(Debug, Clone, Default)]
pub enum IntentState {
    #[default]
    Closed,
    Creating(CreateIntent),
    Editing(EditIntent),
    Submitting,
}

/// Mediator between the UI layer, the remote API, and the local store.
///
/// Mutating operations take `&mut self`, so at most one mutation can be
/// in flight at a time — the compile-time equivalent of disabling the
/// submit button while a request is pending.
pub struct Registrar {
    client: RegistryClient,
    token: AccessToken,
    store: RegistryStore,
    state: IntentState,
}

impl Registrar {
    pub fn new(client: RegistryClient, token: AccessToken) -> Self {
        Self {
            client,
            token,
            store: RegistryStore::new(),
            state: IntentState::Closed,
        }
    }

    /// Read-only access to the local state store.
    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    /// The current intent, for UI layers that render the modal state.
    pub fn intent(&self) -> &IntentState {
        &self.state
    }

    /// Discard any open intent.
    pub fn cancel(&mut self) {
        self.state = IntentState::Closed;
    }

    // ── Synchronization ──────────────────────────────────────────────

    /// Fetch the student listing and replace the snapshot atomically.
    ///
    /// On failure the previous snapshot is left untouched and the error
    /// is returned for the UI to surface.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let students = self.client.list_students(&self.token).await?;
        debug!(count = students.len(), "snapshot refreshed");
        self.store.replace(students);
        Ok(())
    }

    // ── Intent lifecycle ─────────────────────────────────────────────

    /// Open an empty create intent, discarding any open intent.
    pub fn begin_create(&mut self) -> &mut CreateIntent {
        self.state = IntentState::Creating(CreateIntent {
            form: NewStudent {
                email: String::new(),
                last_name: String::new(),
                first_name: String::new(),
                middle_initial: String::new(),
                course: String::new(),
                year: 1,
                gender: String::new(),
                graduating: false,
                password: SecretString::from(String::new()),
            },
        });
        match self.state {
            IntentState::Creating(ref mut intent) => intent,
            _ => unreachable!("state was just set to Creating"),
        }
    }

    /// Open an edit intent pre-filled from the current snapshot,
    /// discarding any open intent.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the current snapshot. Callers resolve the
    /// id against the snapshot first; reaching this with a stale id is a
    /// programming error, not a recoverable condition.
    pub fn begin_edit(&mut self, id: i64) -> &mut EditIntent {
        let record = self
            .store
            .get(id)
            .unwrap_or_else(|| panic!("begin_edit: student {id} is not in the current snapshot"));

        self.state = IntentState::Editing(EditIntent {
            id,
            fields: StudentUpdate::from(&record),
        });
        match self.state {
            IntentState::Editing(ref mut intent) => intent,
            _ => unreachable!("state was just set to Editing"),
        }
    }

    /// Submit the open intent.
    ///
    /// Create intents are validated locally first: a password shorter
    /// than eight characters is rejected before any network call. On a
    /// successful remote call the snapshot is resynchronized and the
    /// intent closes; on a rejected call the intent is restored intact
    /// for correction and retry.
    pub async fn submit(&mut self) -> Result<(), CoreError> {
        let intent = std::mem::replace(&mut self.state, IntentState::Submitting);

        match intent {
            IntentState::Closed | IntentState::Submitting => {
                self.state = IntentState::Closed;
                Err(CoreError::NoIntent)
            }

            IntentState::Creating(create) => {
                if create.form.password.expose_secret().len() < MIN_PASSWORD_LEN {
                    let reason = format!("must be at least {MIN_PASSWORD_LEN} characters");
                    self.state = IntentState::Creating(create);
                    return Err(CoreError::Validation {
                        field: "password".into(),
                        reason,
                    });
                }

                match self.client.create_student(&self.token, &create.form).await {
                    Ok(()) => {
                        debug!(email = %create.form.email, "student registered");
                        self.state = IntentState::Closed;
                        self.refresh().await
                    }
                    Err(e) => {
                        warn!(error = %e, "registration rejected, intent kept for retry");
                        self.state = IntentState::Creating(create);
                        Err(e.into())
                    }
                }
            }

            IntentState::Editing(edit) => {
                match self
                    .client
                    .update_student(&self.token, edit.id, &edit.fields)
                    .await
                {
                    Ok(()) => {
                        debug!(id = edit.id, "student updated");
                        self.state = IntentState::Closed;
                        self.refresh().await
                    }
                    Err(e) => {
                        warn!(error = %e, id = edit.id, "update rejected, intent kept for retry");
                        self.state = IntentState::Editing(edit);
                        Err(e.into())
                    }
                }
            }
        }
    }

    /// Delete a record, then resynchronize.
    ///
    /// Interactive confirmation is the caller's concern; by the time this
    /// runs the decision has been made. A rejected delete leaves the
    /// snapshot unchanged.
    pub async fn remove(&mut self, id: i64) -> Result<(), CoreError> {
        self.client.delete_student(&self.token, id).await?;
        debug!(id, "student deleted");
        self.refresh().await
    }
}
