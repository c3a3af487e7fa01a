use std::collections::{HashMap, HashSet};
use tracing::debug;
use crate::config::SchedulingRules;
use super::error::ScheduleError;
use super::report::{EmployeeLoad, ScheduleReport, SlotRoster};
use super::types::{all_slots, slot_index, CycleState, Day, Preference, ShiftKind, ShiftSlot};

/// Owns the roster, preferences and the state of the current scheduling cycle.
///
/// Not internally synchronized; share it behind a single lock per session.
#[derive(Debug, Clone)]
pub struct SchedulingEngine {
    pub(super) rules: SchedulingRules,
    pub(super) roster: Vec<String>,          // registration order
    pub(super) preferences: Vec<Preference>, // order of first recorded preference
    pub(super) slots: Vec<ShiftSlot>,        // indexed by slot_index
    pub(super) daily: HashMap<Day, HashSet<String>>,
    pub(super) weekly_load: HashMap<String, u32>,
    pub(super) state: CycleState,
}

impl Default for SchedulingEngine {
    fn default() -> Self {
        Self::new(SchedulingRules::default())
    }
}

impl SchedulingEngine {
    pub fn new(rules: SchedulingRules) -> Self {
        Self {
            rules,
            roster: Vec::new(),
            preferences: Vec::new(),
            slots: all_slots().map(|(d, s)| ShiftSlot::new(d, s)).collect(),
            daily: HashMap::new(),
            weekly_load: HashMap::new(),
            state: CycleState::Idle,
        }
    }

    pub fn rules(&self) -> &SchedulingRules {
        &self.rules
    }

    /// Adds an employee to the roster; no-op if already present
    pub fn register(&mut self, employee: &str) {
        if !self.is_registered(employee) {
            debug!(employee, "registered employee");
            self.roster.push(employee.to_string());
        }
    }

    pub fn is_registered(&self, employee: &str) -> bool {
        self.roster.iter().any(|e| e == employee)
    }

    /// Records that `employee` would like `shift` on `day`, registering them if needed
    pub fn add_preference(&mut self, employee: &str, day: Day, shift: ShiftKind) {
        self.register(employee);
        let idx = match self.preferences.iter().position(|p| p.employee == employee) {
            Some(idx) => idx,
            None => {
                self.preferences.push(Preference::new(employee));
                self.preferences.len() - 1
            }
        };
        if self.preferences[idx].add(day, shift) {
            debug!(employee, %day, %shift, "recorded preference");
        }
    }

    /// String-level intake. Unknown day or shift names are rejected and
    /// nothing is recorded, not even the registration.
    pub fn record_preference(&mut self, employee: &str, day: &str, shift: &str) -> Result<(), ScheduleError> {
        match (day.parse::<Day>(), shift.parse::<ShiftKind>()) {
            (Ok(day), Ok(shift)) => {
                self.add_preference(employee, day, shift);
                Ok(())
            }
            _ => Err(ScheduleError::InvalidSlot {
                day: day.to_string(),
                shift: shift.to_string(),
            }),
        }
    }

    /// Drops an employee's preferences and roster entry and discards the
    /// current cycle. Returns false, touching nothing, if the employee was unknown.
    pub fn remove_employee(&mut self, employee: &str) -> bool {
        if !self.is_registered(employee) {
            return false;
        }
        self.roster.retain(|e| e != employee);
        self.preferences.retain(|p| p.employee != employee);
        self.reset_cycle();
        debug!(employee, "removed employee, cycle reset");
        true
    }

    /// True when the employee is free that day, under the weekly cap and not
    /// already in that exact slot
    pub fn can_assign(&self, employee: &str, day: Day, shift: ShiftKind) -> bool {
        let working_today = self
            .daily
            .get(&day)
            .map(|set| set.contains(employee))
            .unwrap_or(false);
        !working_today
            && self.load_of(employee) < self.rules.max_shifts_per_week
            && !self.slots[slot_index(day, shift)].contains(employee)
    }

    /// Places the employee without any checks; pair with `can_assign`
    pub fn assign(&mut self, employee: &str, day: Day, shift: ShiftKind) {
        self.slots[slot_index(day, shift)].employees.push(employee.to_string());
        self.daily.entry(day).or_default().insert(employee.to_string());
        *self.weekly_load.entry(employee.to_string()).or_insert(0) += 1;
        self.state = CycleState::Populated;
    }

    /// Clears every slot, daily set and load count. Roster and preferences stay.
    pub fn reset_cycle(&mut self) {
        self.weekly_load.clear();
        self.daily.clear();
        for slot in &mut self.slots {
            slot.employees.clear();
        }
        self.state = CycleState::Idle;
    }

    pub fn cycle_state(&self) -> CycleState {
        self.state
    }

    /// Registered employees in registration order
    pub fn employees(&self) -> &[String] {
        &self.roster
    }

    pub fn employee_count(&self) -> usize {
        self.roster.len()
    }

    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    pub fn employee_preferences(&self, employee: &str) -> Option<&Preference> {
        self.preferences.iter().find(|p| p.employee == employee)
    }

    pub fn load_of(&self, employee: &str) -> u32 {
        self.weekly_load.get(employee).copied().unwrap_or(0)
    }

    pub fn slot(&self, day: Day, shift: ShiftKind) -> &ShiftSlot {
        &self.slots[slot_index(day, shift)]
    }

    pub fn slots(&self) -> &[ShiftSlot] {
        &self.slots
    }

    pub fn workload(&self) -> Vec<EmployeeLoad> {
        self.roster
            .iter()
            .map(|employee| {
                let shifts = self.load_of(employee);
                EmployeeLoad {
                    employee: employee.clone(),
                    shifts,
                    at_max: shifts >= self.rules.max_shifts_per_week,
                }
            })
            .collect()
    }

    /// Copy of the current cycle's slots and workload
    pub fn snapshot(&self) -> ScheduleReport {
        ScheduleReport {
            slots: self
                .slots
                .iter()
                .map(|s| SlotRoster {
                    day: s.day,
                    shift: s.shift,
                    employees: s.employees.clone(),
                })
                .collect(),
            workload: self.workload(),
        }
    }
}
