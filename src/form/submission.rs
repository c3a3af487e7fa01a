use serde::{Deserialize, Serialize};
use crate::schedule::{Day, ShiftKind};

/// Preference form as submitted by the front end.
/// Leaving both day and shift out registers the employee only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceSubmission {
    pub name: String,
    pub day: Option<String>,
    pub shift: Option<String>,
}

/// A submission that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidSubmission<'a> {
    Register(&'a str),
    Prefer(&'a str, Day, ShiftKind),
}

/// Validates a preference submission
pub fn validate_submission(req: &PreferenceSubmission) -> Result<ValidSubmission<'_>, String> {
    if req.name.trim().is_empty() {
        return Err("Employee name is required".to_string());
    }

    let day = req.day.as_deref().map(str::trim).filter(|d| !d.is_empty());
    let shift = req.shift.as_deref().map(str::trim).filter(|s| !s.is_empty());

    match (day, shift) {
        (None, None) => Ok(ValidSubmission::Register(&req.name)),
        (Some(day), Some(shift)) => {
            let day: Day = day
                .parse()
                .map_err(|_| format!("Invalid day: {}", day))?;
            let shift: ShiftKind = shift
                .parse()
                .map_err(|_| format!("Invalid shift: {}", shift))?;
            Ok(ValidSubmission::Prefer(&req.name, day, shift))
        }
        _ => Err("Day and shift must be given together".to_string()),
    }
}
