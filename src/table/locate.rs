//! Table region location.
//!
//! Real-world sheets bury the data table under arbitrary title rows. The
//! locator finds the header row either from an explicit starting cell or by
//! scanning with a pluggable heuristic, then fixes the column span.

use crate::error::{Result, SiftError};
use crate::table::address::CellAddress;
use crate::table::grid::{CellValue, Grid};

/// How to find the table region within a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionSpec {
    /// The given cell is the top-left header cell.
    Explicit(CellAddress),

    /// Scan rows from the top with the header heuristic.
    AutoDetect,
}

/// Policy deciding whether a row qualifies as a header row.
///
/// Expressed as a trait so alternate heuristics can be swapped in without
/// touching the scan loop. `Sync` because batch runs share one heuristic
/// across worker threads.
pub trait HeaderHeuristic: Sync {
    fn qualifies(&self, row: &[CellValue]) -> bool;
}

/// Default heuristic: a row with at least N non-empty cells "has structure".
///
/// Title and metadata rows typically occupy a single cell, so the line is
/// drawn at two populated cells rather than "row is non-empty".
#[derive(Debug, Clone, Copy)]
pub struct MinPopulated(pub usize);

impl Default for MinPopulated {
    fn default() -> Self {
        Self(2)
    }
}

impl HeaderHeuristic for MinPopulated {
    fn qualifies(&self, row: &[CellValue]) -> bool {
        row.iter().filter(|v| !v.is_empty()).count() >= self.0
    }
}

/// One header cell: its text label and absolute column index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderColumn {
    pub label: String,
    pub index: usize,
}

/// A located table: the header row plus its column span.
///
/// `columns` preserves the left-to-right order of header cells. Name lookup
/// is case-insensitive and whitespace-trimmed; duplicate names keep the
/// last-seen index (see [`crate::table::resolve`]).
#[derive(Debug, Clone)]
pub struct TableRegion {
    pub header_row: usize,
    pub columns: Vec<HeaderColumn>,
}

impl TableRegion {
    /// The top-left cell of the region (header row, first column).
    pub fn start(&self) -> CellAddress {
        let col = self.columns.first().map_or(0, |c| c.index);
        CellAddress::new(self.header_row, col)
    }

    /// Absolute column index for a requested name, trimmed and
    /// case-insensitive. Duplicate header names resolve to the last-seen
    /// index.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize(name);
        self.columns
            .iter()
            .rev()
            .find(|c| normalize(&c.label) == wanted)
            .map(|c| c.index)
    }
}

pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Locate the table region described by `spec`.
///
/// Explicit mode takes the given row as the header row and spans columns
/// left-to-right from the given column until the first empty header cell.
/// Auto-detect mode picks the first row the heuristic accepts, anchored at
/// that row's first non-empty cell.
///
/// # Errors
///
/// [`SiftError::HeaderRowNotFound`] when no qualifying row exists within the
/// populated range, or when the explicit header row contains no header cells.
pub fn locate(grid: &Grid, spec: &RegionSpec, heuristic: &dyn HeaderHeuristic) -> Result<TableRegion> {
    let (rows, _) = grid.dimensions();
    let (header_row, start_col) = match spec {
        RegionSpec::Explicit(addr) => {
            if addr.row >= rows {
                return Err(SiftError::HeaderRowNotFound);
            }
            (addr.row, addr.col)
        }
        RegionSpec::AutoDetect => {
            let header_row = (0..rows)
                .find(|&r| heuristic.qualifies(grid.row(r)))
                .ok_or(SiftError::HeaderRowNotFound)?;
            let start_col = grid
                .row(header_row)
                .iter()
                .position(|v| !v.is_empty())
                .ok_or(SiftError::HeaderRowNotFound)?;
            (header_row, start_col)
        }
    };

    let columns = header_span(grid, header_row, start_col);
    if columns.is_empty() {
        return Err(SiftError::HeaderRowNotFound);
    }

    Ok(TableRegion {
        header_row,
        columns,
    })
}

/// Collect header cells left-to-right from `start_col` until the first empty
/// cell ends the span.
fn header_span(grid: &Grid, header_row: usize, start_col: usize) -> Vec<HeaderColumn> {
    let (_, cols) = grid.dimensions();
    let mut columns = Vec::new();
    for col in start_col..cols {
        let value = grid.value_at(header_row, col);
        if value.is_empty() {
            break;
        }
        columns.push(HeaderColumn {
            label: value.as_text(),
            index: col,
        });
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|s| CellValue::from(*s)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_auto_detect_skips_single_cell_title_row() {
        let g = grid(&[
            &["Quarterly Report", "", "", ""],
            &["ID", "Name", "Job", "Department"],
            &["1", "Ada", "Engineer", "R&D"],
        ]);
        let region = locate(&g, &RegionSpec::AutoDetect, &MinPopulated::default()).unwrap();
        assert_eq!(region.header_row, 1);
        let labels: Vec<&str> = region.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["ID", "Name", "Job", "Department"]);
    }

    #[test]
    fn test_auto_detect_fails_when_no_row_qualifies() {
        let g = grid(&[&["Title"], &["Subtitle"]]);
        assert!(matches!(
            locate(&g, &RegionSpec::AutoDetect, &MinPopulated::default()),
            Err(SiftError::HeaderRowNotFound)
        ));
    }

    #[test]
    fn test_explicit_origin_spans_until_first_empty_cell() {
        let g = grid(&[
            &["", "", "", "", ""],
            &["", "ID", "Name", "", "Notes"],
            &["", "1", "Ada", "", "x"],
        ]);
        let region = locate(
            &g,
            &RegionSpec::Explicit(CellAddress::parse("B2").unwrap()),
            &MinPopulated::default(),
        )
        .unwrap();
        assert_eq!(region.header_row, 1);
        // Span stops before "Notes": the empty D2 ends it.
        let labels: Vec<&str> = region.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["ID", "Name"]);
        assert_eq!(region.start(), CellAddress::parse("B2").unwrap());
    }

    #[test]
    fn test_explicit_origin_on_empty_cell_fails() {
        let g = grid(&[&["ID", "Name"]]);
        // C1 is empty, D9 is past the populated range.
        assert!(matches!(
            locate(
                &g,
                &RegionSpec::Explicit(CellAddress::parse("C1").unwrap()),
                &MinPopulated::default()
            ),
            Err(SiftError::HeaderRowNotFound)
        ));
        assert!(matches!(
            locate(
                &g,
                &RegionSpec::Explicit(CellAddress::parse("D9").unwrap()),
                &MinPopulated::default()
            ),
            Err(SiftError::HeaderRowNotFound)
        ));
    }

    #[test]
    fn test_custom_heuristic_substitutes_cleanly() {
        struct FirstNonEmpty;
        impl HeaderHeuristic for FirstNonEmpty {
            fn qualifies(&self, row: &[CellValue]) -> bool {
                row.iter().any(|v| !v.is_empty())
            }
        }

        let g = grid(&[&["Title", "", ""], &["ID", "Name", "Job"]]);
        let region = locate(&g, &RegionSpec::AutoDetect, &FirstNonEmpty).unwrap();
        assert_eq!(region.header_row, 0);
    }

    #[test]
    fn test_column_index_last_duplicate_wins() {
        let g = grid(&[&["ID", "Name", "ID"]]);
        let region = locate(&g, &RegionSpec::AutoDetect, &MinPopulated::default()).unwrap();
        assert_eq!(region.column_index("id"), Some(2));
        assert_eq!(region.column_index(" Name "), Some(1));
        assert_eq!(region.column_index("missing"), None);
    }
}
