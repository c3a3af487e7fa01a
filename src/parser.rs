use std::io::Read;
use std::path::Path;
use csv::{ReaderBuilder, Trim};
use serde::{Serialize, Deserialize};
use tracing::{info, warn};
use crate::schedule::SchedulingEngine;

/// One row of the preference CSV: `name,day,shift`.
/// Blank day and shift means a plain registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub name: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub shift: String,
}

/// What a CSV load did to the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows: usize,
    pub registered: usize,
    pub preferences: usize,
    pub skipped: usize,
}

/// Loads employees and preferences from a CSV file into the engine
pub fn load_preferences<P: AsRef<Path>>(
    csv_path: P,
    engine: &mut SchedulingEngine,
) -> Result<LoadSummary, Box<dyn std::error::Error>> {
    let file = std::fs::File::open(csv_path)?;
    load_preferences_from_reader(file, engine)
}

/// Same as `load_preferences` for any byte source (uploads, tests)
pub fn load_preferences_from_reader<R: Read>(
    source: R,
    engine: &mut SchedulingEngine,
) -> Result<LoadSummary, Box<dyn std::error::Error>> {
    // Names are identities and stay as written; only headers are trimmed here
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(source);

    // Decode everything before touching the engine so a bad file changes nothing
    let records: Vec<PreferenceRecord> = reader
        .deserialize::<PreferenceRecord>()
        .collect::<Result<_, _>>()?;

    let mut summary = LoadSummary::default();
    let known_before = engine.employee_count();

    for record in &records {
        summary.rows += 1;

        if record.name.trim().is_empty() {
            summary.skipped += 1;
            continue;
        }

        let day = record.day.trim();
        let shift = record.shift.trim();
        if day.is_empty() && shift.is_empty() {
            engine.register(&record.name);
            continue;
        }

        match engine.record_preference(&record.name, day, shift) {
            Ok(()) => summary.preferences += 1,
            Err(e) => {
                warn!(row = summary.rows, name = record.name.as_str(), "skipping row: {}", e);
                summary.skipped += 1;
            }
        }
    }

    summary.registered = engine.employee_count() - known_before;
    info!(
        rows = summary.rows,
        registered = summary.registered,
        preferences = summary.preferences,
        skipped = summary.skipped,
        "loaded preference file"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Day, ShiftKind};

    #[test]
    fn loads_registrations_and_preferences() {
        let csv = "name,day,shift\n\
                   Ana,Monday,Morning\n\
                   Ana,Monday,Evening\n\
                   Bo,,\n\
                   Cy, tuesday , afternoon\n";
        let mut engine = SchedulingEngine::default();

        let summary = load_preferences_from_reader(csv.as_bytes(), &mut engine).unwrap();

        assert_eq!(summary, LoadSummary { rows: 4, registered: 3, preferences: 3, skipped: 0 });
        assert_eq!(engine.employees(), &["Ana".to_string(), "Bo".to_string(), "Cy".to_string()]);
        assert_eq!(
            engine.employee_preferences("Ana").unwrap().shifts_for(Day::Monday),
            &[ShiftKind::Morning, ShiftKind::Evening]
        );
        assert!(engine.employee_preferences("Bo").is_none());
    }

    #[test]
    fn skips_blank_names_and_bad_slots() {
        let csv = "name,day,shift\n,Monday,Morning\nAna,Funday,Morning\nBo,Monday,Night\nCy,Friday,Evening\n";
        let mut engine = SchedulingEngine::default();

        let summary = load_preferences_from_reader(csv.as_bytes(), &mut engine).unwrap();

        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.preferences, 1);
        assert_eq!(engine.employees(), &["Cy".to_string()]);
    }

    #[test]
    fn name_only_rows_are_accepted() {
        let csv = "name\nAna\nBo\n";
        let mut engine = SchedulingEngine::default();

        let summary = load_preferences_from_reader(csv.as_bytes(), &mut engine).unwrap();

        assert_eq!(summary.registered, 2);
        assert_eq!(summary.preferences, 0);
    }

    #[test]
    fn names_keep_their_whitespace() {
        let csv = "name,day,shift\n Ana ,Monday,Morning\nAna,Monday,Evening\n";
        let mut engine = SchedulingEngine::default();

        load_preferences_from_reader(csv.as_bytes(), &mut engine).unwrap();

        assert_eq!(engine.employees(), &[" Ana ".to_string(), "Ana".to_string()]);
        assert_eq!(
            engine.employee_preferences(" Ana ").unwrap().shifts_for(Day::Monday),
            &[ShiftKind::Morning]
        );
    }

    #[test]
    fn undecodable_file_leaves_engine_untouched() {
        let csv: &[u8] = b"name,day,shift\nAna,Monday,Morning\nB\xff,Monday,Morning\n";
        let mut engine = SchedulingEngine::default();
        engine.register("Zed");

        assert!(load_preferences_from_reader(csv, &mut engine).is_err());

        assert_eq!(engine.employees(), &["Zed".to_string()]);
        assert!(engine.preferences().is_empty());
    }
}
