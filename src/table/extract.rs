//! Row filtering and extraction.
//!
//! Walks grid rows strictly below the header until the first fully-empty row
//! (the end of the data table), optionally keeping only rows whose primary
//! column equals a filter value, and projects survivors onto the resolved
//! columns.

use crate::error::{Result, SiftError};
use crate::table::address::CellAddress;
use crate::table::grid::{CellValue, Grid};
use crate::table::locate::{locate, HeaderColumn, HeaderHeuristic, RegionSpec, TableRegion};
use crate::table::resolve::resolve_columns;
use std::time::{Duration, Instant};

/// A cooperative time budget for one extraction pass.
///
/// Carries the whole-budget seconds alongside the expiry instant so the
/// timeout error names the budget that was exceeded, not the time left.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    pub expires_at: Instant,
    pub secs: u64,
}

impl TimeBudget {
    /// A budget of `duration` starting now.
    pub fn starting_now(duration: Duration) -> Self {
        Self {
            expires_at: Instant::now() + duration,
            secs: duration.as_secs(),
        }
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// An equality predicate on the primary column.
///
/// The cell text is trimmed before comparison; the comparison itself is
/// case-sensitive (column *names* are not — a deliberate asymmetry kept from
/// observed behavior).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriterion {
    pub column: String,
    pub value: String,
}

impl FilterCriterion {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    fn matches(&self, cell: &CellValue) -> bool {
        cell.as_text().trim() == self.value
    }
}

/// The outcome of one filter pass: projected rows in scan order.
///
/// Built once, never mutated, consumed by the renderer. Zero matches is a
/// valid result, not an error.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub criterion: Option<FilterCriterion>,
    pub start: CellAddress,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub match_count: usize,
}

/// Knobs for one extraction pass.
pub struct ExtractOptions<'a> {
    /// Columns to project; `None` means all header columns.
    pub columns: Option<&'a [String]>,

    /// Header-row policy for auto-detection.
    pub heuristic: &'a dyn HeaderHeuristic,

    /// Cooperative deadline; the row scan aborts with `EntryTimeout` once
    /// it passes.
    pub deadline: Option<TimeBudget>,
}

impl Default for ExtractOptions<'_> {
    fn default() -> Self {
        static DEFAULT_HEURISTIC: crate::table::locate::MinPopulated =
            crate::table::locate::MinPopulated(2);
        Self {
            columns: None,
            heuristic: &DEFAULT_HEURISTIC,
            deadline: None,
        }
    }
}

/// Run the full pipeline for one criterion: locate → resolve → filter.
///
/// # Errors
///
/// Propagates `HeaderRowNotFound`, `ColumnNotFound` (for the projection or
/// the criterion's primary column) and `EntryTimeout` from the scan.
pub fn extract(
    grid: &Grid,
    spec: &RegionSpec,
    criterion: Option<FilterCriterion>,
    options: &ExtractOptions<'_>,
) -> Result<ExtractionResult> {
    let region = locate(grid, spec, options.heuristic)?;
    let columns = resolve_columns(&region, options.columns)?;

    let primary_index = match &criterion {
        Some(c) => Some(
            region
                .column_index(&c.column)
                .ok_or_else(|| SiftError::ColumnNotFound(c.column.clone()))?,
        ),
        None => None,
    };

    filter_rows(grid, &region, &columns, criterion, primary_index, options.deadline)
}

/// Scan rows below the header and build the result.
fn filter_rows(
    grid: &Grid,
    region: &TableRegion,
    columns: &[HeaderColumn],
    criterion: Option<FilterCriterion>,
    primary_index: Option<usize>,
    deadline: Option<TimeBudget>,
) -> Result<ExtractionResult> {
    let (total_rows, _) = grid.dimensions();
    let mut rows = Vec::new();

    for row in (region.header_row + 1)..total_rows {
        if let Some(budget) = deadline {
            if budget.expired() {
                return Err(SiftError::EntryTimeout(budget.secs));
            }
        }

        // The first fully-empty row ends the data table; rows further below
        // belong to something else.
        if grid.row_is_empty(row) {
            break;
        }

        let included = match (&criterion, primary_index) {
            (Some(c), Some(col)) => c.matches(grid.value_at(row, col)),
            _ => true,
        };
        if included {
            rows.push(
                columns
                    .iter()
                    .map(|c| grid.value_at(row, c.index).clone())
                    .collect(),
            );
        }
    }

    let match_count = rows.len();
    Ok(ExtractionResult {
        criterion,
        start: region.start(),
        columns: columns.iter().map(|c| c.label.clone()).collect(),
        rows,
        match_count,
    })
}
