use std::fs;
use std::path::Path;

use rota_core::errors::ErrorInfo;
use rota_core::{RotaError, SeedSource};
use rota_gen::RunConfig;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Machine readable record of a run, written next to the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Seed that drove the run.
    pub seed: u64,
    /// Where the seed came from.
    pub seed_source: SeedSource,
    /// SHA-256 of the canonical configuration JSON.
    pub config_hash: String,
    /// Number of participants.
    pub participants: usize,
    /// Days the run was asked to produce.
    pub num_days: usize,
    /// Days actually produced.
    pub days_completed: usize,
    /// Candidates drawn for each produced day.
    pub attempts_per_day: Vec<usize>,
    /// Sum of `attempts_per_day`.
    pub total_attempts: usize,
    /// Whether every day was produced.
    pub complete: bool,
    /// RFC 3339 timestamp of when the summary was assembled.
    pub created_at: String,
}

impl RunSummary {
    /// Assembles a summary for a finished or aborted run.
    pub fn new(
        config: &RunConfig,
        seed: u64,
        seed_source: SeedSource,
        attempts_per_day: &[usize],
    ) -> Result<Self, RotaError> {
        let num_days = config.num_days();
        Ok(Self {
            seed,
            seed_source,
            config_hash: config_hash(config)?,
            participants: config.names.len(),
            num_days,
            days_completed: attempts_per_day.len(),
            attempts_per_day: attempts_per_day.to_vec(),
            total_attempts: attempts_per_day.iter().sum(),
            complete: attempts_per_day.len() == num_days,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Writes the summary as pretty JSON.
    pub fn write(&self, path: &Path) -> Result<(), RotaError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| RotaError::io("summary-mkdir", parent, err))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            RotaError::Report(
                ErrorInfo::new("summary-serialize", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        fs::write(path, json).map_err(|err| RotaError::io("summary-write", path, err))
    }

    /// Loads a summary from disk.
    pub fn load(path: &Path) -> Result<Self, RotaError> {
        let contents =
            fs::read_to_string(path).map_err(|err| RotaError::io("summary-read", path, err))?;
        serde_json::from_str(&contents).map_err(|err| {
            RotaError::Report(
                ErrorInfo::new("summary-parse", err.to_string())
                    .with_context("path", path.display()),
            )
        })
    }
}

/// Hex SHA-256 of the configuration serialized as compact JSON.
pub fn config_hash(config: &RunConfig) -> Result<String, RotaError> {
    let bytes = serde_json::to_vec(config).map_err(|err| {
        RotaError::Report(ErrorInfo::new("summary-config-hash", err.to_string()))
    })?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
