//! Store configuration and per-run diff settings

use crate::cli::OutputFormat;
use crate::diff::PruneMode;
use crate::error::{PropdiffError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of `.propdiff/config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    pub prune: PruneMode,
    pub format: OutputFormat,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            version: crate::FORMAT_VERSION.to_string(),
            created: None,
            prune: PruneMode::default(),
            format: OutputFormat::Pretty,
        }
    }
}

impl StoreConfig {
    /// Fresh config stamped with the current time
    pub fn new_stamped() -> Self {
        Self {
            created: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// Load config, falling back to defaults when the file does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            PropdiffError::config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Effective settings for one diff run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffSettings {
    pub prune_mode: PruneMode,
    pub format: OutputFormat,
}

impl DiffSettings {
    /// Command-line values win over the stored config
    pub fn resolve(config: &StoreConfig, prune: Option<&str>, format: Option<&str>) -> Result<Self> {
        let prune_mode = match prune {
            Some(s) => PruneMode::parse(s).map_err(PropdiffError::invalid_input)?,
            None => config.prune,
        };
        let format = match format {
            Some(s) => OutputFormat::parse(s).map_err(PropdiffError::invalid_input)?,
            None => config.format,
        };

        Ok(Self { prune_mode, format })
    }
}
