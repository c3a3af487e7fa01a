pub mod types;
pub mod report;
pub mod error;
pub mod engine;
pub mod generate;

pub use types::{all_slots, CycleState, Day, DayPreference, Preference, ShiftKind, ShiftSlot, SLOTS_PER_WEEK};
pub use report::{EmployeeLoad, ScheduleReport, SlotRoster};
pub use error::ScheduleError;
pub use engine::SchedulingEngine;
