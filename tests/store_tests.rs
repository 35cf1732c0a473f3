use chrono::Duration;
use manetracker::core::store::RecordStore;
use manetracker::errors::AppError;
use manetracker::models::{HaircutFields, HaircutRecord};
use manetracker::utils::date::today;
use std::collections::HashSet;

mod common;
use common::{costing, fields, full_fields, rated};

fn dates(records: &[HaircutRecord]) -> Vec<String> {
    records.iter().map(|r| r.fields.date.clone()).collect()
}

#[test]
fn test_create_assigns_fresh_id_and_keeps_fields() {
    let mut store = RecordStore::new(RecordStore::seed());
    let before = store.list();

    let input = full_fields("2024-06-01", "Taper Fade");
    let created = store.create(input.clone()).expect("create");

    assert!(before.iter().all(|r| r.id != created.id));
    assert_eq!(created.fields, input);

    let after = store.list();
    assert_eq!(after.len(), before.len() + 1);
    let stored = after.iter().find(|r| r.id == created.id).expect("stored");
    assert_eq!(stored.fields, input);
}

#[test]
fn test_rapid_creates_never_share_an_id() {
    let mut store = RecordStore::default();
    let ids: HashSet<String> = (0..50)
        .map(|i| {
            store
                .create(fields("2024-01-01", &format!("Cut {i}")))
                .expect("create")
                .id
        })
        .collect();
    assert_eq!(ids.len(), 50);
}

#[test]
fn test_deleted_id_is_not_reused() {
    let mut store = RecordStore::default();
    let first = store.create(fields("2024-01-01", "Buzz")).expect("create");
    assert!(store.delete(&first.id));

    let second = store.create(fields("2024-01-02", "Crop")).expect("create");
    assert_ne!(first.id, second.id);
}

#[test]
fn test_list_is_newest_first_regardless_of_insert_order() {
    let mut store = RecordStore::default();
    for d in ["2024-01-01", "2024-03-15", "2024-02-10"] {
        store.create(fields(d, "Trim")).expect("create");
    }
    assert_eq!(
        dates(&store.list()),
        vec!["2024-03-15", "2024-02-10", "2024-01-01"]
    );
}

#[test]
fn test_invalid_dates_sort_as_oldest() {
    let store = RecordStore::new(vec![
        HaircutRecord::new("broken", fields("sometime in May", "Mullet")),
        HaircutRecord::new("old", fields("2019-05-01", "Bowl")),
        HaircutRecord::new("new", fields("2024-05-01", "Fade")),
    ]);
    let ids: Vec<String> = store.list().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["new", "old", "broken"]);
}

#[test]
fn test_same_date_keeps_stored_order() {
    let store = RecordStore::new(vec![
        HaircutRecord::new("a", fields("2024-04-04", "First")),
        HaircutRecord::new("b", fields("2024-04-04", "Second")),
    ]);
    let ids: Vec<String> = store.list().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_update_replaces_every_field_but_id() {
    let mut store = RecordStore::default();
    let original = store
        .create(full_fields("2024-02-02", "Pompadour"))
        .expect("create");

    let replacement = fields("2024-05-01", "Buzz Cut");
    let updated = store
        .update(&original.id, replacement.clone())
        .expect("update");

    assert_eq!(updated.id, original.id);
    let stored = store.get(&original.id).expect("still there");
    assert_eq!(stored.fields, replacement);
    assert!(stored.fields.barber.is_none());
    assert!(stored.fields.rating.is_none());
    assert!(stored.fields.cost.is_none());
    assert!(stored.fields.images.is_empty());
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let mut store = RecordStore::new(RecordStore::seed());
    let before = store.list();

    let err = store
        .update("missing", fields("2024-01-01", "Crop"))
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(id) if id == "missing"));
    assert_eq!(store.list(), before);
}

#[test]
fn test_invalid_update_leaves_record_untouched() {
    let mut store = RecordStore::default();
    let original = store.create(full_fields("2024-02-02", "Quiff")).expect("create");

    let err = store
        .update(&original.id, fields("2024-02-03", "   "))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(store.get(&original.id), Some(&original));
}

#[test]
fn test_create_rejects_missing_required_fields() {
    let mut store = RecordStore::default();

    let cases = [
        fields("2024-01-01", ""),
        fields("2024-01-01", "  "),
        fields("", "Fade"),
        fields("2024-13-01", "Fade"),
        fields("01/02/2024", "Fade"),
    ];
    for case in cases {
        let err = store.create(case).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
    }
    assert!(store.is_empty());
}

#[test]
fn test_more_than_five_images_is_rejected() {
    let mut store = RecordStore::default();
    let too_many = HaircutFields {
        images: (0..6).map(|i| format!("img-{i}")).collect(),
        ..fields("2024-01-01", "Fade")
    };
    assert!(matches!(
        store.create(too_many).unwrap_err(),
        AppError::Validation(_)
    ));

    let five = HaircutFields {
        images: (0..5).map(|i| format!("img-{i}")).collect(),
        ..fields("2024-01-01", "Fade")
    };
    assert_eq!(store.create(five).expect("five fit").fields.images.len(), 5);
}

#[test]
fn test_rating_is_clamped() {
    let mut store = RecordStore::default();
    let high = store
        .create(rated("2024-01-01", "High", Some(12.0)))
        .expect("create");
    let low = store
        .create(rated("2024-01-01", "Low", Some(-3.0)))
        .expect("create");

    assert_eq!(high.fields.rating, Some(10.0));
    assert_eq!(low.fields.rating, Some(0.0));

    assert!(matches!(
        store.create(rated("2024-01-01", "NaN", Some(f64::NAN))).unwrap_err(),
        AppError::Validation(_)
    ));
}

#[test]
fn test_negative_cost_is_rejected() {
    let mut store = RecordStore::default();
    let err = store
        .create(costing("2024-01-01", "Fade", Some(-5.0)))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_delete_is_idempotent() {
    let mut store = RecordStore::new(RecordStore::seed());
    let kept = store.create(fields("2024-01-01", "Keep")).expect("create");
    let gone = store.create(fields("2024-01-02", "Gone")).expect("create");
    assert_eq!(store.len(), 3);

    assert!(store.delete(&gone.id));
    assert_eq!(store.len(), 2);

    assert!(!store.delete(&gone.id));
    assert_eq!(store.len(), 2);
    assert!(store.get(&kept.id).is_some());
}

#[test]
fn test_seed_has_one_sample_from_today() {
    let seed = RecordStore::seed();
    assert_eq!(seed.len(), 1);
    assert_eq!(seed[0].id, "sample-1");
    assert_eq!(seed[0].fields.style, "High Fade");
    assert_eq!(seed[0].parsed_date(), Some(today()));
    assert_eq!(seed[0].fields.rating, Some(9.5));
}

#[test]
fn test_days_since_last_uses_newest_record() {
    let mut store = RecordStore::default();
    assert_eq!(store.days_since_last(), None);

    let three_days_ago = (today() - Duration::days(3)).format("%Y-%m-%d").to_string();
    let ten_days_ago = (today() - Duration::days(10)).format("%Y-%m-%d").to_string();
    store.create(fields(&ten_days_ago, "Older")).expect("create");
    store.create(fields(&three_days_ago, "Newer")).expect("create");

    assert_eq!(store.days_since_last(), Some(3));
}

#[test]
fn test_create_after_largest_numeric_id() {
    let max = i64::MAX.to_string();
    let mut store = RecordStore::new(vec![HaircutRecord::new(
        max.clone(),
        fields("2024-01-01", "Old"),
    )]);

    let first = store.create(fields("2024-02-01", "Next")).expect("create");
    let second = store.create(fields("2024-03-01", "After")).expect("create");

    assert_ne!(first.id, max);
    assert_ne!(second.id, max);
    assert_ne!(first.id, second.id);
    assert_eq!(store.len(), 3);
}
