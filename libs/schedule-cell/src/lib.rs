pub mod models;
pub mod services;

// Re-export the domain surface for external use
pub use models::{
    BusinessScheduleError, Doctor, Patient, Room, ScheduleEntry, ScheduleError,
    ScheduleInstant, ScheduleSnapshot, Specialization, TimeRange,
};
pub use services::{immerse, Schedule};
