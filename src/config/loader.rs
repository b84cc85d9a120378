//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading time-accounting
//! policies and holiday calendars from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{HolidayCalendar, Minutes};

use super::types::{CltPolicy, EngineConfig, HolidayFile, StandardPolicy};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/br-clt/
/// ├── standard.yaml       # Standard calculator policy
/// ├── clt.yaml            # CLT statutory constants
/// └── holidays/
///     └── 2025.yaml       # Holidays of one operational year
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/br-clt")?;
/// println!("Normal workday: {}", loader.config().clt().normal_workday);
/// # Ok::<(), timesheet_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `standard.yaml` or `clt.yaml` is missing
    /// - Any file contains invalid YAML
    /// - A policy value is out of range
    ///
    /// A missing `holidays/` directory yields an empty calendar (Sundays are
    /// still detected).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let standard = Self::load_yaml::<StandardPolicy>(&path.join("standard.yaml"))?;
        let clt = Self::load_yaml::<CltPolicy>(&path.join("clt.yaml"))?;
        let holidays = Self::load_holidays(&path.join("holidays"))?;

        validate_standard(&standard)?;
        validate_clt(&clt)?;

        info!(
            path = %path.display(),
            holidays = holidays.len(),
            "Loaded time-accounting configuration"
        );

        Ok(Self {
            config: EngineConfig::new(standard, clt, holidays),
        })
    }

    /// Statutory defaults without touching the filesystem.
    pub fn statutory() -> Self {
        Self::default()
    }

    /// Wraps an already-built configuration, e.g. a policy tuned in code.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every holiday file in the directory into one calendar.
    fn load_holidays(dir: &Path) -> EngineResult<HolidayCalendar> {
        let mut calendar = HolidayCalendar::default();

        if !dir.exists() {
            debug!(path = %dir.display(), "No holiday directory, using empty calendar");
            return Ok(calendar);
        }

        let dir_str = dir.display().to_string();
        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<HolidayFile>(&path)?;
                debug!(year = file.year, count = file.holidays.len(), "Loaded holidays");
                calendar.extend(HolidayCalendar::new(file.holidays));
            }
        }

        Ok(calendar)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidPolicy {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn validate_standard(policy: &StandardPolicy) -> EngineResult<()> {
    if policy.overtime_multiplier < Decimal::ONE {
        return Err(invalid("overtime_multiplier", "must be at least 1"));
    }
    if policy.max_shift_span <= Minutes::ZERO {
        return Err(invalid("max_shift_span", "must be positive"));
    }
    Ok(())
}

fn validate_clt(policy: &CltPolicy) -> EngineResult<()> {
    if policy.normal_workday <= Minutes::ZERO {
        return Err(invalid("normal_workday", "must be positive"));
    }
    if policy.legal_night_hour_minutes <= Decimal::ZERO {
        return Err(invalid("legal_night_hour_minutes", "must be positive"));
    }
    if policy.overtime_premium.is_sign_negative()
        || policy.sunday_holiday_premium.is_sign_negative()
        || policy.night_premium.is_sign_negative()
    {
        return Err(invalid("premium", "premiums cannot be negative"));
    }
    Ok(())
}
