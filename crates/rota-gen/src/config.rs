use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rota_core::errors::ErrorInfo;
use rota_core::{Roster, RotaError};
use serde::{Deserialize, Serialize};

/// JSON-configurable parameters governing a rota run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Participant names in report order.
    pub names: Vec<String>,
    /// Number of full rotations; each spans `names.len() - 1` days.
    pub num_rounds: usize,
    /// Number of prior days a new assignment must not repeat (0 disables).
    #[serde(default = "default_history_length")]
    pub history_length: usize,
    /// Candidate draws allowed per day before the run fails.
    #[serde(default = "default_max_tries")]
    pub max_tries: usize,
    /// Master seed; `null` draws a fresh seed from OS entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Calendar date of day 0. Only the report uses it.
    pub start_date: NaiveDate,
    /// Rendering options for the CSV grid.
    #[serde(default)]
    pub report: ReportOptions,
}

fn default_history_length() -> usize {
    1
}

fn default_max_tries() -> usize {
    1000
}

/// Presentation settings for the rendered grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Text placed in the header row above the participant column.
    #[serde(default = "default_corner_label")]
    pub corner_label: String,
    /// `chrono` format string used for the date columns.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_corner_label() -> String {
    "Donks".to_string()
}

fn default_date_format() -> String {
    "%m/%d".to_string()
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            corner_label: default_corner_label(),
            date_format: default_date_format(),
        }
    }
}

impl RunConfig {
    /// Parses a configuration from JSON text and validates it.
    pub fn from_json_str(text: &str) -> Result<Self, RotaError> {
        let config: RunConfig = serde_json::from_str(text).map_err(|err| {
            RotaError::Config(
                ErrorInfo::new("config-parse", err.to_string())
                    .with_context("line", err.line())
                    .with_context("column", err.column()),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, RotaError> {
        let text = fs::read_to_string(path).map_err(|err| RotaError::io("config-read", path, err))?;
        Self::from_json_str(&text).map_err(|err| match err {
            RotaError::Config(info) => {
                RotaError::Config(info.with_context("path", path.display()))
            }
            other => other,
        })
    }

    /// Checks the invariants the generator relies on.
    pub fn validate(&self) -> Result<(), RotaError> {
        self.roster()?;
        if self.num_rounds == 0 {
            return Err(RotaError::Config(
                ErrorInfo::new("config-num-rounds", "num_rounds must be positive")
                    .with_context("num_rounds", "0"),
            ));
        }
        if self.max_tries == 0 {
            return Err(RotaError::Config(
                ErrorInfo::new("config-max-tries", "max_tries must be positive")
                    .with_context("max_tries", "0"),
            ));
        }
        if self.report.date_format.trim().is_empty() {
            return Err(RotaError::Config(ErrorInfo::new(
                "config-date-format",
                "report.date_format must not be empty",
            )));
        }
        Ok(())
    }

    /// Validated participant roster.
    pub fn roster(&self) -> Result<Roster, RotaError> {
        Roster::new(self.names.iter().cloned()).map_err(|err| match err {
            RotaError::Roster(info) => RotaError::Config(info.with_hint("fix the `names` list")),
            other => other,
        })
    }

    /// Total number of days in the run: `(participants - 1) * num_rounds`.
    pub fn num_days(&self) -> usize {
        self.names.len().saturating_sub(1) * self.num_rounds
    }
}
