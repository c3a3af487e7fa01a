use std::path::Path;
use shift_roster::config::{SchedulingRules, ServerConfig};
use shift_roster::display::{format_preferences, print_outcome, write_schedule_to_file};
use shift_roster::form::{demo_engine, export_preferences_to_csv};
use shift_roster::parser::load_preferences;
use shift_roster::{logging, web, SchedulingEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let rules = SchedulingRules::from_env()?;
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        // Web mode: JSON API around one shared engine
        Some("web") => {
            let config = ServerConfig::from_args(args.get(2).map(String::as_str));
            println!("Starting web server on port {}...", config.port);
            println!("Access the API at http://localhost:{}/api/schedule", config.port);

            web::start_server(config, SchedulingEngine::new(rules)).await?;
        }
        // Demo mode: write a random but reproducible preference file
        Some("demo") => {
            let count = args.get(2).and_then(|c| c.parse::<usize>().ok()).unwrap_or(12);
            let csv_path = args.get(3).map(String::as_str).unwrap_or("data/demo_preferences.csv");

            let engine = demo_engine(count, 42);
            if let Some(parent) = Path::new(csv_path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            export_preferences_to_csv(&engine, Path::new(csv_path))?;
            println!("Wrote {} employees to {}", engine.employee_count(), csv_path);
        }
        // CLI mode: load a preference CSV, generate, print and save
        other => {
            let csv_path = other.unwrap_or("data/preferences.csv");
            let mut engine = SchedulingEngine::new(rules);

            println!("Loading preferences from {}...", csv_path);
            let summary = load_preferences(csv_path, &mut engine)?;
            println!(
                "Loaded {} employees, {} preferences ({} rows skipped)",
                engine.employee_count(),
                summary.preferences,
                summary.skipped
            );
            println!("\n{}", format_preferences(engine.preferences()));

            println!("\n=== Running Scheduler ===");
            let outcome = engine.generate();
            print_outcome(&outcome);

            if let Ok(report) = &outcome {
                write_schedule_to_file(report, "schedule_week.txt")?;
                println!("Schedule saved to schedule_week.txt");
            }
        }
    }

    Ok(())
}
