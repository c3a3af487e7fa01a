use std::io::Write;
use std::path::Path;
use csv::WriterBuilder;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use crate::parser::PreferenceRecord;
use crate::schedule::{all_slots, SchedulingEngine};

/// Writes the engine's roster and preferences in the `name,day,shift`
/// format `parser::load_preferences` reads. Employees without preferences
/// get a name-only row.
pub fn export_preferences<W: Write>(
    engine: &SchedulingEngine,
    writer: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);

    // Preference order first so a reload seeds employees in the same order
    let mut rows: Vec<PreferenceRecord> = Vec::new();
    for pref in engine.preferences() {
        for (day, shift) in pref.choices() {
            rows.push(PreferenceRecord {
                name: pref.employee.clone(),
                day: day.to_string(),
                shift: shift.to_string(),
            });
        }
    }
    for employee in engine.employees() {
        if engine.employee_preferences(employee).is_none() {
            rows.push(PreferenceRecord {
                name: employee.clone(),
                day: String::new(),
                shift: String::new(),
            });
        }
    }

    for row in &rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_preferences_to_csv(
    engine: &SchedulingEngine,
    csv_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::create(csv_path)?;
    export_preferences(engine, file)
}

/// Builds an engine with `count` employees, each holding up to three random
/// (day, shift) preferences. The same seed always yields the same roster.
pub fn demo_engine(count: usize, seed: u64) -> SchedulingEngine {
    let mut rng = StdRng::seed_from_u64(seed);
    let slots: Vec<_> = all_slots().collect();
    let mut engine = SchedulingEngine::default();

    for i in 1..=count {
        let name = format!("Employee {:02}", i);
        let wanted = rng.gen_range(0..=3);
        if wanted == 0 {
            engine.register(&name);
            continue;
        }
        for &(day, shift) in slots.choose_multiple(&mut rng, wanted) {
            engine.add_preference(&name, day, shift);
        }
    }
    engine
}
