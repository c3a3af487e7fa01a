use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::warn;

pub const MAX_SHIFTS_PER_WEEK: u32 = 5;
pub const MIN_EMPLOYEES_PER_SHIFT: usize = 2;
pub const MIN_TOTAL_EMPLOYEES: usize = 9;

/// Environment variable naming a JSON file with scheduling limits
pub const RULES_ENV_VAR: &str = "SHIFT_ROSTER_RULES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse rules file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid rule {field}: must be at least 1")]
    Invalid { field: &'static str },
}

/// Hard limits the engine enforces. Owned per engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingRules {
    pub max_shifts_per_week: u32,
    pub min_employees_per_shift: usize,
    pub min_total_employees: usize,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            max_shifts_per_week: MAX_SHIFTS_PER_WEEK,
            min_employees_per_shift: MIN_EMPLOYEES_PER_SHIFT,
            min_total_employees: MIN_TOTAL_EMPLOYEES,
        }
    }
}

impl SchedulingRules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_shifts_per_week == 0 {
            return Err(ConfigError::Invalid { field: "max_shifts_per_week" });
        }
        if self.min_employees_per_shift == 0 {
            return Err(ConfigError::Invalid { field: "min_employees_per_shift" });
        }
        if self.min_total_employees == 0 {
            return Err(ConfigError::Invalid { field: "min_total_employees" });
        }
        Ok(())
    }

    /// Loads rules from a JSON file. Missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let rules: SchedulingRules = serde_json::from_str(&raw)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Rules from the file named by `SHIFT_ROSTER_RULES`, or the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(RULES_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => Ok(Self::default()),
        }
    }
}

/// Settings for the HTTP front end
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub admin_password: String,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 8080;

    pub const DEFAULT_ADMIN_PASSWORD: &'static str = "admin123";

    /// Port from the optional CLI argument, password from `ADMIN_PASSWORD`
    pub fn from_args(port_arg: Option<&str>) -> Self {
        let config = Self::from_parts(port_arg, std::env::var("ADMIN_PASSWORD").ok());
        if config.uses_default_password() {
            warn!("ADMIN_PASSWORD not set, using the default admin password");
        }
        config
    }

    pub fn from_parts(port_arg: Option<&str>, admin_password: Option<String>) -> Self {
        let port = port_arg
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(Self::DEFAULT_PORT);
        let admin_password = admin_password
            .unwrap_or_else(|| Self::DEFAULT_ADMIN_PASSWORD.to_string()); // Default password, change this!
        Self { port, admin_password }
    }

    pub fn uses_default_password(&self) -> bool {
        self.admin_password == Self::DEFAULT_ADMIN_PASSWORD
    }
}
