// libs/schedule-cell/tests/schedule_entry_test.rs
use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};

use schedule_cell::{
    Doctor, Patient, Room, ScheduleEntry, ScheduleError, ScheduleInstant, Specialization,
};

#[test]
fn construction_rejects_zero_length_and_inverted_ranges() {
    for seconds in [0, 1, 3600] {
        let result = ScheduleEntry::new(
            example_surgeon(),
            end() + Duration::seconds(seconds),
            end(),
            example_room(),
            None,
        );

        assert_matches!(result, Err(ScheduleError::InvalidRange(_, _)));
    }
}

#[test]
fn construction_error_names_both_bounds() {
    let error = ScheduleEntry::new(example_surgeon(), end(), start(), example_room(), None)
        .unwrap_err();

    assert_eq!(error.to_string(), format!("{} should be less than {}", end(), start()));
}

#[test]
fn is_a_visit_only_with_a_patient() {
    let on_call = example_entry(start(), end());
    let visit = on_call.with_patient(example_patient());

    assert!(!on_call.is_visit());
    assert!(visit.is_visit());
    assert_eq!(visit.patient(), Some(&example_patient()));
    // copy-with-override leaves the original untouched
    assert!(on_call.patient().is_none());
}

#[test]
fn is_identified_by_its_values() {
    let build_visit = || {
        ScheduleEntry::new(
            example_surgeon(),
            start(),
            end(),
            example_room(),
            Some(Patient::new("Frank")),
        )
        .unwrap()
    };
    let build_on_call =
        || ScheduleEntry::new(example_surgeon(), start(), end(), example_room(), None).unwrap();

    assert_eq!(build_visit(), build_visit());
    assert_eq!(build_on_call(), build_on_call());
    assert_ne!(build_visit(), build_on_call());
}

#[test]
fn interferes_with_itself() {
    let entry = example_entry(start(), end());

    assert!(entry.interferes_with(&entry));
}

#[test]
fn does_not_interfere_when_exactly_abutting() {
    let entry = example_entry(start(), end());
    let right_after = example_entry(end(), end() + Duration::hours(2));
    let right_before = example_entry(start() - Duration::hours(2), start());

    assert!(!entry.interferes_with(&right_after));
    assert!(!entry.interferes_with(&right_before));
}

#[test]
fn does_not_interfere_in_a_different_room() {
    let entry = example_entry(start(), end());
    let other = ScheduleEntry::new(
        example_surgeon(),
        start(),
        end(),
        Room::new("different"),
        None,
    )
    .unwrap();

    assert!(!entry.interferes_with(&other));
}

#[test]
fn interferes_when_the_other_starts_inside() {
    let entry = example_entry(start(), end());
    for starts_between in [
        start() + Duration::seconds(1),
        start() + Duration::hours(1),
        end() - Duration::seconds(1),
    ] {
        let other = example_entry(starts_between, starts_between + Duration::hours(2));

        assert!(entry.interferes_with(&other));
    }
}

#[test]
fn interferes_when_the_other_ends_inside() {
    let entry = example_entry(start(), end());
    for ends_between in [
        end() - Duration::seconds(1),
        start() + Duration::seconds(1),
        start() + Duration::hours(1),
    ] {
        let other = example_entry(ends_between - Duration::hours(2), ends_between);

        assert!(entry.interferes_with(&other));
    }
}

#[test]
fn interference_is_symmetric() {
    let entry = example_entry(start(), end());
    let overlapping = example_entry(start() + Duration::hours(1), end() + Duration::hours(1));
    let abutting = example_entry(end(), end() + Duration::hours(1));
    let disjoint = example_entry(end() + Duration::hours(1), end() + Duration::hours(2));

    for other in [overlapping, abutting, disjoint] {
        assert_eq!(entry.interferes_with(&other), other.interferes_with(&entry));
    }
}

// ==============================================================================
// FIXTURES
// ==============================================================================

fn start() -> ScheduleInstant {
    Utc.with_ymd_and_hms(2023, 5, 15, 10, 0, 0)
        .unwrap()
        .fixed_offset()
}

fn end() -> ScheduleInstant {
    start() + Duration::hours(2)
}

fn example_entry(from: ScheduleInstant, to: ScheduleInstant) -> ScheduleEntry {
    ScheduleEntry::new(example_surgeon(), from, to, Room::new("foo"), None).unwrap()
}

fn example_surgeon() -> Doctor {
    Doctor::new(Specialization::Surgeon)
}

fn example_room() -> Room {
    Room::new("foo")
}

fn example_patient() -> Patient {
    Patient::new("patient")
}
