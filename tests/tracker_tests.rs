use manetracker::core::filter::{FilterSpec, ValueRange};
use manetracker::core::persistence::{
    MemorySlots, PersistenceWarning, RECORDS_SLOT, SESSION_SLOT, SlotBackend,
};
use manetracker::core::tracker::{DEFAULT_IDENTITY, Tracker};
use manetracker::db::log::load_log;
use manetracker::db::pool::DbPool;
use manetracker::errors::{AppError, AppResult};
use manetracker::models::HaircutRecord;
use std::collections::HashMap;

mod common;
use common::{fields, rated};

/// Memory slots that count writes per key.
#[derive(Default, Clone)]
struct CountingSlots {
    inner: MemorySlots,
    writes: HashMap<String, usize>,
}

impl CountingSlots {
    fn writes(&self, key: &str) -> usize {
        self.writes.get(key).copied().unwrap_or(0)
    }
}

impl SlotBackend for CountingSlots {
    fn read_slot(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.read_slot(key)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> AppResult<()> {
        *self.writes.entry(key.to_string()).or_default() += 1;
        self.inner.write_slot(key, value)
    }
}

#[test]
fn test_cold_start_seeds_and_writes_nothing() {
    let tracker = Tracker::open(MemorySlots::new());

    assert!(!tracker.is_logged_in());
    let records = tracker.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "sample-1");
    assert_eq!(tracker.backend().raw(RECORDS_SLOT), None);
    assert_eq!(tracker.backend().raw(SESSION_SLOT), None);
    assert!(tracker.warnings().is_empty());
}

#[test]
fn test_each_mutation_saves_records_once() {
    let mut tracker = Tracker::open(CountingSlots::default());

    let r = tracker.add_record(fields("2024-01-01", "Fade")).expect("add");
    assert_eq!(tracker.backend().writes(RECORDS_SLOT), 1);

    tracker
        .edit_record(&r.id, fields("2024-01-02", "Crop"))
        .expect("edit");
    assert_eq!(tracker.backend().writes(RECORDS_SLOT), 2);

    tracker.delete_record(&r.id);
    assert_eq!(tracker.backend().writes(RECORDS_SLOT), 3);

    assert_eq!(tracker.backend().writes(SESSION_SLOT), 0);
}

#[test]
fn test_failed_mutations_do_not_save() {
    let mut tracker = Tracker::open(CountingSlots::default());

    assert!(matches!(
        tracker.add_record(fields("2024-01-01", "")),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        tracker.edit_record("nope", fields("2024-01-01", "Fade")),
        Err(AppError::NotFound(_))
    ));
    assert_eq!(tracker.backend().writes(RECORDS_SLOT), 0);
}

#[test]
fn test_login_and_logout_each_save_session_once() {
    let mut tracker = Tracker::open(CountingSlots::default());

    assert_eq!(tracker.login(), DEFAULT_IDENTITY);
    assert_eq!(tracker.backend().writes(SESSION_SLOT), 1);
    assert_eq!(
        tracker.backend().inner.raw(SESSION_SLOT),
        Some("\"ManeTracker User\"")
    );

    tracker.logout();
    assert_eq!(tracker.backend().writes(SESSION_SLOT), 2);
    assert_eq!(tracker.backend().inner.raw(SESSION_SLOT), Some("null"));
    assert_eq!(tracker.current_user(), None);
    assert_eq!(tracker.backend().writes(RECORDS_SLOT), 0);
}

#[test]
fn test_state_survives_reopen() {
    let mut tracker = Tracker::open_as(MemorySlots::new(), "Sam");
    tracker.login();
    let added = tracker
        .add_record(rated("2024-03-15", "Mid Fade", Some(7.5)))
        .expect("add");

    let reopened = Tracker::open(tracker.backend().clone());
    assert_eq!(reopened.current_user(), Some("Sam"));
    let ids: Vec<String> = reopened.records().into_iter().map(|r| r.id).collect();
    assert!(ids.contains(&added.id));
    assert!(ids.contains(&"sample-1".to_string()));
}

#[test]
fn test_corrupt_records_fall_back_to_seed() {
    let mut slots = MemorySlots::new();
    slots.insert_raw(RECORDS_SLOT, "not json at all");
    slots.insert_raw(SESSION_SLOT, "\"ManeTracker User\"");

    let tracker = Tracker::open(slots);
    assert!(tracker.is_logged_in());
    assert_eq!(tracker.records(), manetracker::core::store::RecordStore::seed());
    assert!(matches!(
        tracker.warnings(),
        [PersistenceWarning::Corrupt { .. }]
    ));
}

#[test]
fn test_memory_state_wins_when_storage_is_full() {
    let mut tracker = Tracker::open(MemorySlots::with_quota(8));

    let added = tracker.add_record(fields("2024-04-01", "Undercut")).expect("add");
    assert!(tracker.record(&added.id).is_some());
    assert_eq!(tracker.records().len(), 2);

    let warnings = tracker.take_warnings();
    assert!(matches!(
        warnings.as_slice(),
        [PersistenceWarning::WriteFailed { key, .. }] if key == RECORDS_SLOT
    ));
}

#[test]
fn test_filter_is_a_view_over_the_store() {
    let mut tracker = Tracker::open(MemorySlots::new());
    tracker.add_record(rated("2024-01-01", "Low", Some(3.0))).expect("add");
    tracker.add_record(rated("2024-02-01", "High", Some(9.0))).expect("add");

    let spec = FilterSpec::new().with_rating_range(ValueRange::rating(Some(8.0), None).unwrap());
    tracker.apply_filter(spec);

    let visible: Vec<String> = tracker
        .visible_records()
        .into_iter()
        .map(|r| r.fields.style)
        .collect();
    // seed (9.5, today) comes first: newest first
    assert_eq!(visible, vec!["High Fade", "High"]);
    assert_eq!(tracker.records().len(), 3);

    tracker.clear_filter();
    assert!(tracker.active_filter().is_none());
    assert_eq!(tracker.visible_records().len(), 3);
}

#[test]
fn test_mutations_are_audited_in_sqlite() {
    let mut tracker = Tracker::open(DbPool::in_memory().expect("db"));
    tracker.login();
    let r: HaircutRecord = tracker.add_record(fields("2024-01-01", "Fade")).expect("add");
    tracker.delete_record(&r.id);
    tracker.delete_record(&r.id);

    let ops: Vec<String> = load_log(&tracker.backend().conn)
        .expect("log")
        .into_iter()
        .map(|e| e.operation)
        .filter(|op| op != "migration_applied")
        .collect();
    assert_eq!(ops, vec!["login", "add", "del"]);
}

#[test]
fn test_require_login() {
    let mut tracker = Tracker::open(MemorySlots::new());
    assert!(matches!(tracker.require_login(), Err(AppError::NotLoggedIn)));
    tracker.login();
    assert_eq!(tracker.require_login().expect("logged in"), DEFAULT_IDENTITY);
}
