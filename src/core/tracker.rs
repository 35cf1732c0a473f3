use super::filter::{self, FilterSpec};
use super::persistence::{Persistence, PersistenceWarning, RECORDS_SLOT, SESSION_SLOT, SlotBackend};
use super::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::{HaircutFields, HaircutRecord};

/// Identity stored in the session slot by [`Tracker::login`].
pub const DEFAULT_IDENTITY: &str = "ManeTracker User";

/// Application state built once at startup and handed to the shell.
///
/// Every store mutation is followed by exactly one save of the records slot,
/// every login/logout by exactly one save of the session slot.
pub struct Tracker<B: SlotBackend> {
    persistence: Persistence<B>,
    store: RecordStore,
    session: Option<String>,
    identity: String,
    active_filter: Option<FilterSpec>,
}

impl<B: SlotBackend> Tracker<B> {
    /// Load session and records from `backend`, seeding the records on a cold start.
    pub fn open(backend: B) -> Self {
        Self::open_as(backend, DEFAULT_IDENTITY)
    }

    pub fn open_as(backend: B, identity: impl Into<String>) -> Self {
        let mut persistence = Persistence::new(backend);
        let session: Option<String> = persistence.load(SESSION_SLOT, None);
        let records: Vec<HaircutRecord> = persistence.load(RECORDS_SLOT, RecordStore::seed());

        Self {
            persistence,
            store: RecordStore::new(records),
            session,
            identity: identity.into(),
            active_filter: None,
        }
    }

    // ---------------------------
    // Session
    // ---------------------------

    pub fn login(&mut self) -> &str {
        let identity = self.identity.clone();
        self.persistence.save(SESSION_SLOT, &Some(identity.as_str()));
        self.persistence.audit("login", &identity, "Session started");
        self.session.insert(identity)
    }

    pub fn logout(&mut self) {
        self.session = None;
        self.persistence.save::<Option<String>>(SESSION_SLOT, &None);
        self.persistence.audit("logout", "", "Session ended");
    }

    pub fn current_user(&self) -> Option<&str> {
        self.session.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Fail with `NotLoggedIn` unless a session marker is present.
    pub fn require_login(&self) -> AppResult<&str> {
        self.current_user().ok_or(AppError::NotLoggedIn)
    }

    // ---------------------------
    // Records
    // ---------------------------

    pub fn add_record(&mut self, fields: HaircutFields) -> AppResult<HaircutRecord> {
        let record = self.store.create(fields)?;
        self.flush();
        self.persistence
            .audit("add", &record.id, &format!("Added '{}' on {}", record.fields.style, record.fields.date));
        Ok(record)
    }

    pub fn edit_record(&mut self, id: &str, fields: HaircutFields) -> AppResult<HaircutRecord> {
        let record = self.store.update(id, fields)?;
        self.flush();
        self.persistence
            .audit("edit", id, &format!("Replaced with '{}' on {}", record.fields.style, record.fields.date));
        Ok(record)
    }

    /// Idempotent: returns whether a record was actually removed.
    pub fn delete_record(&mut self, id: &str) -> bool {
        let removed = self.store.delete(id);
        self.flush();
        if removed {
            self.persistence.audit("del", id, "Haircut deleted");
        }
        removed
    }

    pub fn record(&self, id: &str) -> Option<&HaircutRecord> {
        self.store.get(id)
    }

    /// Every record, newest first.
    pub fn records(&self) -> Vec<HaircutRecord> {
        self.store.list()
    }

    pub fn days_since_last(&self) -> Option<i64> {
        self.store.days_since_last()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    // ---------------------------
    // Filtering
    // ---------------------------

    pub fn apply_filter(&mut self, spec: FilterSpec) {
        self.active_filter = Some(spec);
    }

    pub fn clear_filter(&mut self) {
        self.active_filter = None;
    }

    pub fn active_filter(&self) -> Option<&FilterSpec> {
        self.active_filter.as_ref()
    }

    /// Records newest first, narrowed by the active filter.
    pub fn visible_records(&self) -> Vec<HaircutRecord> {
        filter::apply(self.store.list(), self.active_filter.as_ref())
    }

    // ---------------------------
    // Persistence
    // ---------------------------

    pub fn warnings(&self) -> &[PersistenceWarning] {
        self.persistence.warnings()
    }

    pub fn take_warnings(&mut self) -> Vec<PersistenceWarning> {
        self.persistence.take_warnings()
    }

    pub fn backend(&self) -> &B {
        self.persistence.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.persistence.backend_mut()
    }

    fn flush(&mut self) {
        self.persistence.save(RECORDS_SLOT, self.store.records());
    }
}
