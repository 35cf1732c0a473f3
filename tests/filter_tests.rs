use manetracker::core::filter::{self, DateRange, FilterSpec, ValueRange};
use manetracker::errors::AppError;
use manetracker::models::{HaircutFields, HaircutRecord};

mod common;
use common::{costing, fields, rated};

fn record(id: &str, f: HaircutFields) -> HaircutRecord {
    HaircutRecord::new(id, f)
}

fn ids(records: &[HaircutRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

/// A(9.5, Jan), B(unrated, Feb), C(4.0, Mar)
fn rated_set() -> Vec<HaircutRecord> {
    vec![
        record("A", rated("2024-01-01", "Fade", Some(9.5))),
        record("B", rated("2024-02-01", "Crop", None)),
        record("C", rated("2024-03-01", "Buzz", Some(4.0))),
    ]
}

#[test]
fn test_min_rating_excludes_unrated_and_lower() {
    let spec = FilterSpec::new().with_rating_range(ValueRange::rating(Some(5.0), None).unwrap());
    let out = filter::apply(rated_set(), Some(&spec));
    assert_eq!(ids(&out), vec!["A"]);
}

#[test]
fn test_max_rating_keeps_unrated() {
    let spec = FilterSpec::new().with_rating_range(ValueRange::rating(None, Some(5.0)).unwrap());
    let out = filter::apply(rated_set(), Some(&spec));
    assert_eq!(ids(&out), vec!["B", "C"]);
}

#[test]
fn test_rating_bounds_are_inclusive() {
    let spec =
        FilterSpec::new().with_rating_range(ValueRange::rating(Some(4.0), Some(9.5)).unwrap());
    let out = filter::apply(rated_set(), Some(&spec));
    assert_eq!(ids(&out), vec!["A", "C"]);
}

#[test]
fn test_cost_range_treats_missing_cost_like_rating() {
    let records = vec![
        record("cheap", costing("2024-01-01", "Trim", Some(15.0))),
        record("free", costing("2024-01-02", "Home cut", None)),
        record("pricey", costing("2024-01-03", "Color", Some(120.0))),
    ];

    let min = FilterSpec::new().with_cost_range(ValueRange::cost(Some(20.0), None).unwrap());
    assert_eq!(ids(&filter::apply(records.clone(), Some(&min))), vec!["pricey"]);

    let max = FilterSpec::new().with_cost_range(ValueRange::cost(None, Some(20.0)).unwrap());
    assert_eq!(ids(&filter::apply(records, Some(&max))), vec!["cheap", "free"]);
}

#[test]
fn test_keyword_is_case_insensitive_across_text_fields() {
    let records = vec![
        record(
            "shop",
            HaircutFields {
                barbershop: Some("The Gentry Barbershop".into()),
                ..fields("2024-01-01", "Fade")
            },
        ),
        record(
            "notes",
            HaircutFields {
                notes: Some("asked for a GENTLE taper".into()),
                ..fields("2024-01-02", "Taper")
            },
        ),
        record(
            "barber",
            HaircutFields {
                barber: Some("Gent Nikolla".into()),
                ..fields("2024-01-03", "Crop")
            },
        ),
        record("none", fields("2024-01-04", "Buzz")),
    ];

    let spec = FilterSpec::new().with_keyword("gent");
    let out = filter::apply(records, Some(&spec));
    assert_eq!(ids(&out), vec!["shop", "notes", "barber"]);
}

#[test]
fn test_keyword_matches_style() {
    let spec = FilterSpec::new().with_keyword("BUZZ");
    let out = filter::apply(rated_set(), Some(&spec));
    assert_eq!(ids(&out), vec!["C"]);
}

#[test]
fn test_date_range_is_inclusive_and_open_ended() {
    let both = FilterSpec::new()
        .with_date_range(DateRange::new(Some("2024-01-01"), Some("2024-02-01")).unwrap());
    assert_eq!(ids(&filter::apply(rated_set(), Some(&both))), vec!["A", "B"]);

    let from = FilterSpec::new().with_date_range(DateRange::new(Some("2024-02-01"), None).unwrap());
    assert_eq!(ids(&filter::apply(rated_set(), Some(&from))), vec!["B", "C"]);

    let until = FilterSpec::new().with_date_range(DateRange::new(None, Some("2024-01-31")).unwrap());
    assert_eq!(ids(&filter::apply(rated_set(), Some(&until))), vec!["A"]);
}

#[test]
fn test_all_constraints_must_hold() {
    let spec = FilterSpec::new()
        .with_keyword("a")
        .with_date_range(DateRange::new(Some("2024-01-01"), None).unwrap())
        .with_rating_range(ValueRange::rating(Some(9.0), None).unwrap());
    let out = filter::apply(rated_set(), Some(&spec));
    assert_eq!(ids(&out), vec!["A"]);
}

#[test]
fn test_empty_spec_returns_everything_unchanged() {
    let input = rated_set();
    assert_eq!(filter::apply(input.clone(), None), input);
    assert_eq!(filter::apply(input.clone(), Some(&FilterSpec::new())), input);

    let blank = FilterSpec::new().with_keyword("");
    assert!(blank.is_empty());
    assert_eq!(filter::apply(input.clone(), Some(&blank)), input);
}

#[test]
fn test_keyword_keeps_surrounding_spaces() {
    let records = vec![
        record("joined", fields("2024-01-01", "Skinfade")),
        record("spaced", fields("2024-01-02", "Skin Fade")),
    ];

    let spec = FilterSpec::new().with_keyword(" fade");
    assert_eq!(spec.keyword(), Some(" fade"));
    assert_eq!(ids(&filter::apply(records.clone(), Some(&spec))), vec!["spaced"]);

    let spaces = FilterSpec::new().with_keyword("  ");
    assert!(!spaces.is_empty());
    assert_eq!(spaces.keyword(), Some("  "));
}

#[test]
fn test_incoherent_specs_are_rejected_at_construction() {
    assert!(matches!(
        ValueRange::rating(Some(8.0), Some(3.0)),
        Err(AppError::InvalidFilter(_))
    ));
    assert!(matches!(
        ValueRange::rating(Some(11.0), None),
        Err(AppError::InvalidFilter(_))
    ));
    assert!(matches!(
        ValueRange::cost(Some(-1.0), None),
        Err(AppError::InvalidFilter(_))
    ));
    assert!(matches!(
        ValueRange::new(Some(f64::NAN), None),
        Err(AppError::InvalidFilter(_))
    ));
    assert!(matches!(
        DateRange::new(Some("2024-05-01"), Some("2024-01-01")),
        Err(AppError::InvalidFilter(_))
    ));
    assert!(matches!(
        DateRange::new(Some("May 1st"), None),
        Err(AppError::InvalidDate(_))
    ));
}
