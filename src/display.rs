use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use chrono::Local;
use crate::schedule::{Day, Preference, ScheduleError, ScheduleReport, ShiftKind};

/// Formats the shifts a report holds, skipping empty slots:
///
/// ```text
/// Weekly Schedule:
///
/// Monday:
///   Morning: Ana, Bo
/// ```
pub fn format_schedule(report: &ScheduleReport) -> String {
    let mut out = String::from("Weekly Schedule:\n\n");
    for day in Day::ALL {
        let _ = writeln!(out, "{}:", day);
        for shift in ShiftKind::ALL {
            if let Some(slot) = report.slot(day, shift) {
                if !slot.employees.is_empty() {
                    let _ = writeln!(out, "  {}: {}", shift, slot.employees.join(", "));
                }
            }
        }
        out.push('\n');
    }
    out
}

/// One line per employee; ` (MAX)` marks anyone at the weekly cap
pub fn format_workload(report: &ScheduleReport) -> String {
    let mut lines = vec!["Employee Workload:".to_string()];
    for load in &report.workload {
        let max_indicator = if load.at_max { " (MAX)" } else { "" };
        lines.push(format!("{}: {} shifts{}", load.employee, load.shifts, max_indicator));
    }
    lines.join("\n")
}

pub fn format_preferences(preferences: &[Preference]) -> String {
    let mut out = String::from("Current Preferences:\n");
    for pref in preferences {
        let _ = writeln!(out, "{}:", pref.employee);
        for day_pref in &pref.days {
            let shifts: Vec<&str> = day_pref.shifts.iter().map(|s| s.name()).collect();
            let _ = writeln!(out, "  {}: {}", day_pref.day, shifts.join(", "));
        }
    }
    out
}

pub fn format_success(report: &ScheduleReport) -> String {
    format!(
        "Schedule successfully generated!\n\n{}\n\n{}",
        format_workload(report),
        format_schedule(report)
    )
}

/// Human-readable failure, including the partial roster for shortfalls
pub fn format_failure(err: &ScheduleError) -> String {
    match err {
        ScheduleError::InsufficientStaff { required, current } => format!(
            "Error: At least {} employees are required.\nCurrent number of employees: {}",
            required, current
        ),
        ScheduleError::StaffingShortfall { day, shift, partial } => format!(
            "Error: Unable to meet minimum staffing requirement for {} {} shift.\n\
             Current schedule state:\n{}\nEmployee workload:\n{}",
            day,
            shift,
            format_schedule(partial),
            format_workload(partial)
        ),
        ScheduleError::InvalidSlot { day, shift } => {
            format!("Error: Invalid day or shift: {:?} {:?}", day, shift)
        }
    }
}

pub fn format_outcome(outcome: &Result<ScheduleReport, ScheduleError>) -> String {
    match outcome {
        Ok(report) => format_success(report),
        Err(err) => format_failure(err),
    }
}

/// Writes the schedule and workload to a file under a timestamped header
pub fn write_schedule_to_file(
    report: &ScheduleReport,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;

    writeln!(file, "** Weekly Schedule (generated {}) **", Local::now().format("%Y-%m-%d %H:%M"))?;
    writeln!(file)?;
    write!(file, "{}", format_schedule(report))?;
    writeln!(file, "{}", format_workload(report))?;

    Ok(())
}

/// Prints a schedule outcome to stdout
pub fn print_outcome(outcome: &Result<ScheduleReport, ScheduleError>) {
    println!("\n=== Weekly Schedule ===");
    println!("{}", format_outcome(outcome));
}
