pub mod immersion;
pub mod schedule;

pub use immersion::immerse;
pub use schedule::Schedule;
