//! Batch orchestration: one extraction per mapping entry.
//!
//! Every entry runs the same locate → resolve → filter → render pipeline
//! against the shared, read-only grid. Entries are independent — no shared
//! mutable state, no ordering dependency — so they fan out across a rayon
//! worker pool. A failure in one entry is recorded in that entry's outcome
//! and never aborts the rest.

use crate::error::{Result, SiftError};
use crate::mapping::MappingEntry;
use crate::render::render_extraction;
use crate::table::extract::{extract, ExtractOptions, FilterCriterion, TimeBudget};
use crate::table::grid::Grid;
use crate::table::locate::{HeaderHeuristic, MinPopulated, RegionSpec};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Options for one batch run.
pub struct BatchOptions<'a> {
    /// Columns to project, identical across all entries; `None` = all.
    pub columns: Option<&'a [String]>,

    /// Header-row policy for auto-detection.
    pub heuristic: &'a dyn HeaderHeuristic,

    /// Worker pool width; `None` = one worker per available core.
    pub workers: Option<usize>,

    /// Per-entry time budget; an entry over budget fails with `EntryTimeout`
    /// without affecting the others.
    pub entry_timeout: Option<Duration>,

    /// Cooperative cancellation: once set, remaining entries are reported as
    /// not attempted.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for BatchOptions<'_> {
    fn default() -> Self {
        static DEFAULT_HEURISTIC: MinPopulated = MinPopulated(2);
        Self {
            columns: None,
            heuristic: &DEFAULT_HEURISTIC,
            workers: None,
            entry_timeout: None,
            cancel: None,
        }
    }
}

/// Per-entry outcome; the batch result is one of these per mapping entry, in
/// mapping order.
#[derive(Debug)]
pub struct EntryOutcome {
    pub key: String,
    pub status: EntryStatus,
}

/// Tagged status — failures stay inside the entry they belong to.
#[derive(Debug)]
pub enum EntryStatus {
    /// Rendered document plus how many rows matched (zero is valid).
    Rendered { document: String, match_count: usize },

    /// This entry failed; the rest of the batch is unaffected.
    Failed(SiftError),

    /// The batch was cancelled before this entry was scheduled.
    NotAttempted,
}

/// Aggregate tallies for the end-of-run summary.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub rendered: usize,
    pub empty: usize,
    pub failed: usize,
    pub not_attempted: usize,
}

impl BatchReport {
    pub fn tally(outcomes: &[EntryOutcome]) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            match &outcome.status {
                EntryStatus::Rendered { match_count: 0, .. } => report.empty += 1,
                EntryStatus::Rendered { .. } => report.rendered += 1,
                EntryStatus::Failed(_) => report.failed += 1,
                EntryStatus::NotAttempted => report.not_attempted += 1,
            }
        }
        report
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch completed: {} rendered, {} with zero matches, {} failed, {} not attempted",
            self.rendered, self.empty, self.failed, self.not_attempted
        )
    }
}

/// Run one extraction+render per mapping entry.
///
/// Outcomes come back in mapping order regardless of scheduling.
///
/// # Errors
///
/// [`SiftError::EmptyMapping`] when `entries` is empty, before any extraction
/// runs. Per-entry failures are carried inside the outcome list instead.
pub fn run_batch(
    grid: &Grid,
    spec: &RegionSpec,
    primary_column: &str,
    entries: &[MappingEntry],
    options: &BatchOptions<'_>,
) -> Result<Vec<EntryOutcome>> {
    if entries.is_empty() {
        return Err(SiftError::EmptyMapping);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers.unwrap_or(0))
        .build()
        .map_err(|e| SiftError::Other(format!("Failed to build worker pool: {e}")))?;

    let outcomes = pool.install(|| {
        entries
            .par_iter()
            .map(|entry| run_entry(grid, spec, primary_column, entry, options))
            .collect()
    });

    Ok(outcomes)
}

fn run_entry(
    grid: &Grid,
    spec: &RegionSpec,
    primary_column: &str,
    entry: &MappingEntry,
    options: &BatchOptions<'_>,
) -> EntryOutcome {
    if options
        .cancel
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
    {
        return EntryOutcome {
            key: entry.key.clone(),
            status: EntryStatus::NotAttempted,
        };
    }

    let extract_options = ExtractOptions {
        columns: options.columns,
        heuristic: options.heuristic,
        deadline: options.entry_timeout.map(TimeBudget::starting_now),
    };
    let criterion = FilterCriterion::new(primary_column, entry.value.clone());

    let status = match extract(grid, spec, Some(criterion), &extract_options) {
        Ok(result) => {
            if result.match_count == 0 {
                tracing::warn!(key = %entry.key, value = %entry.value, "no rows matched");
            } else {
                tracing::info!(
                    key = %entry.key,
                    matches = result.match_count,
                    "entry extracted"
                );
            }
            EntryStatus::Rendered {
                match_count: result.match_count,
                document: render_extraction(&result),
            }
        }
        Err(err) => {
            tracing::warn!(key = %entry.key, error = %err, "entry failed");
            EntryStatus::Failed(err)
        }
    };

    EntryOutcome {
        key: entry.key.clone(),
        status,
    }
}
