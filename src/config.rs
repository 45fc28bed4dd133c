//! Run configuration.
//!
//! Defaults that would otherwise become ambient globals (output directory,
//! default sheet, header heuristic threshold, worker pool size) live in an
//! explicit [`RunConfig`] passed into the pipeline entry points, so batch
//! runs stay reentrant and testable in isolation.

use crate::error::{Result, ResultExt as _};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Sheet to process when none is named on the command line; `None` means
    /// the workbook's first sheet.
    #[serde(default)]
    pub default_sheet: Option<String>,

    /// Directory reports are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Minimum non-empty cells for a row to qualify as a header row during
    /// auto-detection.
    #[serde(default = "default_min_header_cells")]
    pub min_header_cells: usize,

    /// Batch worker pool width; `None` = one per available core.
    #[serde(default)]
    pub workers: Option<usize>,

    /// Per-entry time budget for batch runs, in seconds.
    #[serde(default)]
    pub entry_timeout_secs: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            default_sheet: None,
            output_dir: default_output_dir(),
            min_header_cells: default_min_header_cells(),
            workers: None,
            entry_timeout_secs: None,
        }
    }
}

impl RunConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Save configuration as pretty-printed JSON.
    pub fn to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::SiftError::Other(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, json).context("Failed to write config file")
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_min_header_cells() -> usize {
    2
}
