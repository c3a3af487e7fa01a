use serde::{Serialize, Deserialize};
use super::types::{Day, ShiftKind};

/// Employees placed in one slot, in assignment order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRoster {
    pub day: Day,
    pub shift: ShiftKind,
    pub employees: Vec<String>,
}

/// Shifts one employee holds in the current cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeLoad {
    pub employee: String,
    pub shifts: u32,
    pub at_max: bool,
}

/// Snapshot of a cycle: every slot in traversal order plus per-employee load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub slots: Vec<SlotRoster>,
    pub workload: Vec<EmployeeLoad>, // roster registration order
}

impl ScheduleReport {
    pub fn slot(&self, day: Day, shift: ShiftKind) -> Option<&SlotRoster> {
        self.slots.iter().find(|s| s.day == day && s.shift == shift)
    }

    pub fn load_of(&self, employee: &str) -> u32 {
        self.workload
            .iter()
            .find(|l| l.employee == employee)
            .map(|l| l.shifts)
            .unwrap_or(0)
    }

    pub fn total_assignments(&self) -> usize {
        self.slots.iter().map(|s| s.employees.len()).sum()
    }
}
