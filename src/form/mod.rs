pub mod submission;
pub mod export;

pub use submission::{PreferenceSubmission, ValidSubmission, validate_submission};
pub use export::{demo_engine, export_preferences, export_preferences_to_csv};
