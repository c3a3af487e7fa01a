use tracing::{debug, info, warn};
use super::engine::SchedulingEngine;
use super::error::ScheduleError;
use super::report::ScheduleReport;
use super::types::{all_slots, slot_index, Day, ShiftKind};

impl SchedulingEngine {
    /// Builds a fresh weekly schedule from the roster and preferences.
    ///
    /// # Algorithm
    /// 1. Refuse outright when the roster is below `min_total_employees`.
    /// 2. Reset the cycle.
    /// 3. Preference pass: each employee (in preference order) is seeded into
    ///    the first of their preferred slots that is still empty and feasible.
    /// 4. Systematic fill: every slot, in calendar order, is topped up to
    ///    `min_employees_per_shift` with the least-loaded eligible employee,
    ///    ties going to the earliest registered.
    ///
    /// Greedy, no backtracking: a slot with no eligible employee aborts the
    /// run and the partial roster is returned inside the error.
    pub fn generate(&mut self) -> Result<ScheduleReport, ScheduleError> {
        if self.roster.len() < self.rules.min_total_employees {
            warn!(
                current = self.roster.len(),
                required = self.rules.min_total_employees,
                "not enough employees to build a schedule"
            );
            return Err(ScheduleError::InsufficientStaff {
                required: self.rules.min_total_employees,
                current: self.roster.len(),
            });
        }

        self.reset_cycle();

        let seeded = self.seed_preferred_slots();
        debug!(seeded, "preference pass complete");

        self.fill_to_minimum()?;

        let report = self.snapshot();
        info!(
            employees = self.roster.len(),
            assignments = report.total_assignments(),
            "schedule generated"
        );
        Ok(report)
    }

    /// Phase 1. Returns the number of employees seeded.
    fn seed_preferred_slots(&mut self) -> usize {
        // Collected up front so assignments can borrow self mutably
        let wishes: Vec<(String, Vec<(Day, ShiftKind)>)> = self
            .preferences
            .iter()
            .map(|p| (p.employee.clone(), p.choices().collect()))
            .collect();

        let mut seeded = 0;
        for (employee, choices) in &wishes {
            let first_open = choices.iter().copied().find(|&(day, shift)| {
                self.can_assign(employee, day, shift) && self.slots[slot_index(day, shift)].is_empty()
            });
            if let Some((day, shift)) = first_open {
                debug!(employee = employee.as_str(), %day, %shift, "seeded preferred slot");
                self.assign(employee, day, shift);
                seeded += 1;
            }
        }
        seeded
    }

    /// Phase 2
    fn fill_to_minimum(&mut self) -> Result<(), ScheduleError> {
        for (day, shift) in all_slots() {
            while self.slots[slot_index(day, shift)].len() < self.rules.min_employees_per_shift {
                let Some(employee) = self.least_loaded_candidate(day, shift) else {
                    warn!(%day, %shift, "no eligible employee left for slot");
                    return Err(ScheduleError::StaffingShortfall {
                        day,
                        shift,
                        partial: Box::new(self.snapshot()),
                    });
                };
                self.assign(&employee, day, shift);
            }
        }
        Ok(())
    }

    /// Eligible employee with the smallest load; the earliest registered wins ties
    fn least_loaded_candidate(&self, day: Day, shift: ShiftKind) -> Option<String> {
        self.roster
            .iter()
            .filter(|e| self.can_assign(e, day, shift))
            .min_by_key(|e| self.load_of(e))
            .cloned()
    }
}
