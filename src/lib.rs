//! Weekly shift rostering.
//!
//! `schedule::SchedulingEngine` holds the roster, per-day shift preferences and
//! the current cycle, and builds a week in two greedy passes: preferred slots
//! are seeded first, then every slot is topped up with the least-loaded
//! eligible employee. The remaining modules are adapters around it: CSV
//! intake (`parser`), text rendering (`display`), form validation and export
//! (`form`) and a JSON API (`web`).

pub mod config;
pub mod display;
pub mod form;
pub mod logging;
pub mod parser;
pub mod schedule;
pub mod web;

pub use config::{SchedulingRules, ServerConfig};
pub use schedule::{Day, ScheduleError, ScheduleReport, SchedulingEngine, ShiftKind};
