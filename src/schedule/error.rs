use thiserror::Error;
use super::report::ScheduleReport;
use super::types::{Day, ShiftKind};

/// Expected, reportable outcomes of schedule intake and generation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("at least {required} employees are required, {current} registered")]
    InsufficientStaff { required: usize, current: usize },

    /// Partial roster up to the failing slot is kept for display
    #[error("unable to meet minimum staffing for {day} {shift} shift")]
    StaffingShortfall {
        day: Day,
        shift: ShiftKind,
        partial: Box<ScheduleReport>,
    },

    #[error("invalid slot: day {day:?}, shift {shift:?}")]
    InvalidSlot { day: String, shift: String },
}
