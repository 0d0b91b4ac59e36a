// libs/schedule-cell/src/models.rs
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Instant in time with an associated offset. The domain only ever compares
/// these; chrono orders and hashes them by the underlying instant.
pub type ScheduleInstant = DateTime<FixedOffset>;

// ==============================================================================
// CATALOG VALUE TYPES
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialization {
    Surgeon,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Doctor {
    pub specialization: Specialization,
}

impl Doctor {
    pub fn new(specialization: Specialization) -> Self {
        Self { specialization }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
}

impl Patient {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// ==============================================================================
// TIME RANGE
// ==============================================================================

/// Interval between two instants. Construction never validates; degenerate
/// ranges are the "no valid merge" signal inside the immersion fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: ScheduleInstant,
    pub to: ScheduleInstant,
}

impl TimeRange {
    pub fn new(from: ScheduleInstant, to: ScheduleInstant) -> Self {
        Self { from, to }
    }

    /// Sentinel range that is empty and can never contain or merge with
    /// anything.
    pub fn empty() -> Self {
        Self {
            from: DateTime::<Utc>::MAX_UTC.fixed_offset(),
            to: DateTime::<Utc>::MIN_UTC.fixed_offset(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    /// Inclusive on both ends.
    pub fn contains(&self, point: ScheduleInstant) -> bool {
        self.from <= point && point <= self.to
    }

    /// Half-open: inclusive start, exclusive end. An entry ending exactly
    /// when another begins does not overlap it.
    pub fn within(&self, point: ScheduleInstant) -> bool {
        self.from <= point && point < self.to
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.within(other.from) || other.within(self.from)
    }

    /// Merge with a range starting exactly where this one ends. Not
    /// commutative; anything else (gap or overlap) yields the empty sentinel.
    pub fn merge_adjacent(&self, other: &TimeRange) -> TimeRange {
        if self.to == other.from {
            TimeRange::new(self.from, other.to)
        } else {
            TimeRange::empty()
        }
    }
}

// ==============================================================================
// SCHEDULE ENTRY
// ==============================================================================

/// One occupancy slot: a doctor covering a room for a time range, with an
/// optional patient. An entry with a patient is a visit; without one it is
/// on-call coverage.
///
/// Immutable after construction; any change produces a new entry. Identity is
/// structural over all fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleEntry {
    doctor: Doctor,
    from: ScheduleInstant,
    to: ScheduleInstant,
    room: Room,
    patient: Option<Patient>,
}

impl ScheduleEntry {
    /// Fails with [`ScheduleError::InvalidRange`] unless `from < to` strictly.
    pub fn new(
        doctor: Doctor,
        from: ScheduleInstant,
        to: ScheduleInstant,
        room: Room,
        patient: Option<Patient>,
    ) -> Result<Self, ScheduleError> {
        if from >= to {
            return Err(ScheduleError::InvalidRange(from, to));
        }
        Ok(Self {
            doctor,
            from,
            to,
            room,
            patient,
        })
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn from(&self) -> ScheduleInstant {
        self.from
    }

    pub fn to(&self) -> ScheduleInstant {
        self.to
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn patient(&self) -> Option<&Patient> {
        self.patient.as_ref()
    }

    pub fn is_visit(&self) -> bool {
        self.patient.is_some()
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.from, self.to)
    }

    /// New entry with a patient attached; the original is untouched.
    pub fn with_patient(&self, patient: Patient) -> ScheduleEntry {
        ScheduleEntry {
            patient: Some(patient),
            ..self.clone()
        }
    }

    /// Entries interfere when they share a room and their time ranges overlap
    /// under half-open semantics. Exact abutment (`a.to == b.from`) does not
    /// interfere; the two-sided overlap test makes the predicate symmetric
    /// for any two well-formed entries.
    pub fn interferes_with(&self, other: &ScheduleEntry) -> bool {
        self.room == other.room && self.dates_interfere_with(other)
    }

    /// Time-only interference, ignoring rooms.
    pub(crate) fn dates_interfere_with(&self, other: &ScheduleEntry) -> bool {
        self.range().overlaps(&other.range())
    }

    /// On-call copy of this entry over `[from, to)`, or `None` when the
    /// interval is degenerate. Callers guarantee `from`/`to` come from
    /// well-formed ranges.
    pub(crate) fn on_call_remainder(
        &self,
        from: ScheduleInstant,
        to: ScheduleInstant,
    ) -> Option<ScheduleEntry> {
        (from < to).then(|| ScheduleEntry {
            doctor: self.doctor.clone(),
            from,
            to,
            room: self.room.clone(),
            patient: None,
        })
    }

    /// Copy of this entry truncated to `[from, to)`, patient preserved.
    /// Callers guarantee `from < to`.
    pub(crate) fn truncated_to(
        &self,
        from: ScheduleInstant,
        to: ScheduleInstant,
    ) -> ScheduleEntry {
        ScheduleEntry {
            from,
            to,
            ..self.clone()
        }
    }
}

// ==============================================================================
// SCHEDULE SNAPSHOT
// ==============================================================================

/// Point-in-time view of a clinic's schedule. Plain serializable aggregate;
/// persistence belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub clinic_id: Uuid,
    pub entries: HashSet<ScheduleEntry>,
}

impl ScheduleSnapshot {
    pub fn new(clinic_id: Uuid, entries: HashSet<ScheduleEntry>) -> Self {
        Self { clinic_id, entries }
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

/// Root scheduling error: either the fatal bad-range construction failure or
/// a recognized business rejection.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("{0} should be less than {1}")]
    InvalidRange(ScheduleInstant, ScheduleInstant),

    #[error(transparent)]
    Business(#[from] BusinessScheduleError),
}

/// Closed taxonomy of business rule violations. Raised by the schedule
/// aggregate, never by the interference/immersion primitives.
#[derive(Error, Debug)]
pub enum BusinessScheduleError {
    #[error("Cannot schedule for a given date. All the rooms taken")]
    DateAlreadyTaken,

    #[error("Cannot schedule for a room \"{}\"", .0.name)]
    RoomAlreadyTaken(Room),

    #[error("On call cannot have a patient attached")]
    OnCallWithPatient,

    #[error("A visit needs a patient")]
    NoPatient,

    #[error("{0}")]
    NoDoctorOnCall(String),

    #[error("Doctor should be in room {}", .0.name)]
    RoomMismatch(Room),

    #[error("There are already interfering visits, e.g. for patient {}", .0.name)]
    VisitAlreadyScheduled(Patient),

    #[error("Nothing found for the given period")]
    NothingToErase,
}
