// ── Replace-only snapshot store ──
//
// The local mirror of the last successful student listing. There is no
// partial merge path at all: every write replaces the whole snapshot, so
// readers either see the previous listing or the new one, never a mix.

use std::sync::Arc;

use tokio::sync::watch;

use rollcall_api::StudentRecord;

/// The local state store for student records.
///
/// Holds the full snapshot from the last successful fetch behind `watch`
/// channels. [`Registrar`](crate::Registrar) is the only writer; readers
/// get cheap `Arc` clones of the current snapshot or a subscription for
/// push-based change notification.
///
/// Known weak point: two overlapping refreshes are not ordered — the last
/// response to arrive wins. Acceptable at this scale; callers that care
/// should serialize their refreshes.
pub struct RegistryStore {
    /// Full snapshot, replaced wholesale on every successful fetch.
    snapshot: watch::Sender<Arc<Vec<StudentRecord>>>,

    /// Version counter, bumped on every replacement.
    version: watch::Sender<u64>,
}

impl RegistryStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (version, _) = watch::channel(0u64);
        Self { snapshot, version }
    }

    /// The current snapshot (cheap `Arc` clone), in server-provided order.
    pub fn snapshot(&self) -> Arc<Vec<StudentRecord>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot replacements.
    ///
    /// Dropping the receiver tears the subscription down; no callback
    /// wiring to unhook.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<StudentRecord>>> {
        self.snapshot.subscribe()
    }

    /// The current snapshot version. Increments once per replacement.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Look up a record by id in the current snapshot.
    pub fn get(&self, id: i64) -> Option<StudentRecord> {
        self.snapshot.borrow().iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }

    /// Replace the snapshot atomically.
    ///
    /// Server order is preserved. Duplicate ids should not happen; if the
    /// server ever sends one, the first occurrence wins so the store's
    /// one-record-per-id invariant holds.
    pub(crate) fn replace(&self, records: Vec<StudentRecord>) {
        let mut seen = std::collections::HashSet::with_capacity(records.len());
        let deduped: Vec<StudentRecord> = records
            .into_iter()
            .filter(|r| seen.insert(r.id))
            .collect();

        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(deduped));
        self.version.send_modify(|v| *v += 1);
    }
}

impl Default for RegistryStore {
    fn default() -> Self {
        Self::new()
    }
}
