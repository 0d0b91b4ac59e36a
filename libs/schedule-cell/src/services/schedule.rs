// libs/schedule-cell/src/services/schedule.rs
use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{
    BusinessScheduleError, Room, ScheduleEntry, ScheduleError, ScheduleInstant,
    ScheduleSnapshot, TimeRange,
};
use crate::services::immersion::immerse;

/// A clinic's schedule: the room catalog plus the current set of entries.
/// The only place in the crate that raises [`BusinessScheduleError`];
/// every mutation validates against the interference and immersion
/// primitives first.
pub struct Schedule {
    clinic_id: Uuid,
    rooms: HashSet<Room>,
    entries: HashSet<ScheduleEntry>,
}

impl Schedule {
    pub fn new(rooms: HashSet<Room>) -> Self {
        Self {
            clinic_id: Uuid::new_v4(),
            rooms,
            entries: HashSet::new(),
        }
    }

    /// Rebuild a schedule from a persisted snapshot and the current room
    /// catalog.
    pub fn restore(snapshot: ScheduleSnapshot, rooms: HashSet<Room>) -> Self {
        Self {
            clinic_id: snapshot.clinic_id,
            rooms,
            entries: snapshot.entries,
        }
    }

    pub fn snapshot(&self) -> ScheduleSnapshot {
        ScheduleSnapshot::new(self.clinic_id, self.entries.clone())
    }

    /// Add on-call coverage.
    ///
    /// A clash in the requested room is [`BusinessScheduleError::RoomAlreadyTaken`]
    /// while another catalog room is still free, and
    /// [`BusinessScheduleError::DateAlreadyTaken`] once every room is
    /// occupied. A schedule without a room catalog treats any clash as the
    /// latter.
    pub fn schedule_on_call(&mut self, entry: ScheduleEntry) -> Result<(), ScheduleError> {
        if entry.is_visit() {
            warn!("rejecting on-call entry carrying a patient");
            return Err(BusinessScheduleError::OnCallWithPatient.into());
        }

        let clashing_rooms: HashSet<&Room> = self
            .entries
            .iter()
            .filter(|existing| existing.dates_interfere_with(&entry))
            .map(|existing| existing.room())
            .collect();
        if clashing_rooms.is_empty() {
            debug!(room = %entry.room().name, "scheduling on-call");
            self.entries.insert(entry);
            return Ok(());
        }
        if !self.rooms.is_empty() && !clashing_rooms.contains(entry.room()) {
            debug!(room = %entry.room().name, "scheduling on-call in a free room");
            self.entries.insert(entry);
            return Ok(());
        }
        if self.rooms.iter().any(|room| !clashing_rooms.contains(room)) {
            return Err(BusinessScheduleError::RoomAlreadyTaken(entry.room().clone()).into());
        }
        Err(BusinessScheduleError::DateAlreadyTaken.into())
    }

    /// Book a visit by immersing it into the doctor's on-call coverage.
    pub fn schedule_visit(&mut self, visit: ScheduleEntry) -> Result<(), ScheduleError> {
        if !visit.is_visit() {
            return Err(BusinessScheduleError::NoPatient.into());
        }

        // An already booked visit wins even when it has consumed all the
        // on-call coverage underneath it.
        if let Some(conflicting) = self
            .entries
            .iter()
            .find(|existing| existing.is_visit() && existing.interferes_with(&visit))
        {
            if let Some(patient) = conflicting.patient() {
                warn!(patient = %patient.name, "visit clashes with an existing visit");
                return Err(BusinessScheduleError::VisitAlreadyScheduled(patient.clone()).into());
            }
        }

        let on_calls: HashSet<ScheduleEntry> = self
            .entries
            .iter()
            .filter(|existing| {
                !existing.is_visit()
                    && existing.doctor() == visit.doctor()
                    && existing.dates_interfere_with(&visit)
            })
            .cloned()
            .collect();
        if on_calls.is_empty() {
            return Err(BusinessScheduleError::NoDoctorOnCall(
                "No corresponding on call for this doctor".into(),
            )
            .into());
        }
        if let Some(mismatched) = on_calls.iter().find(|entry| entry.room() != visit.room()) {
            return Err(BusinessScheduleError::RoomMismatch(mismatched.room().clone()).into());
        }

        let replacement = immerse(&visit, &on_calls);
        if replacement == on_calls {
            return Err(BusinessScheduleError::NoDoctorOnCall(
                "Doctor's on calls are not fully aligned with the visit".into(),
            )
            .into());
        }
        debug!("replacing {} on-call entries with the immersed visit", on_calls.len());
        self.entries.retain(|existing| !on_calls.contains(existing));
        self.entries.extend(replacement);
        Ok(())
    }

    /// Drop every entry overlapping `[from, to)`, keeping truncated copies of
    /// any coverage outside the window. Entries that merely abut the window
    /// are untouched.
    pub fn erase(
        &mut self,
        from: ScheduleInstant,
        to: ScheduleInstant,
    ) -> Result<(), ScheduleError> {
        if from >= to {
            return Err(ScheduleError::InvalidRange(from, to));
        }
        let window = TimeRange::new(from, to);

        let overlapping: Vec<ScheduleEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.range().overlaps(&window))
            .cloned()
            .collect();
        if overlapping.is_empty() {
            return Err(BusinessScheduleError::NothingToErase.into());
        }

        debug!("erasing {} entries between {} and {}", overlapping.len(), from, to);
        for entry in overlapping {
            self.entries.remove(&entry);
            if entry.from() < from {
                self.entries.insert(entry.truncated_to(entry.from(), from));
            }
            if to < entry.to() {
                self.entries.insert(entry.truncated_to(to, entry.to()));
            }
        }
        Ok(())
    }
}
