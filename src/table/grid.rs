//! Dense, immutable 2-D model of a single sheet's values.
//!
//! A [`Grid`] is built once per invocation from whatever the sheet loader
//! produced, then shared read-only across every extraction pass. Trailing
//! all-empty rows and columns are trimmed at construction so `dimensions()`
//! reflects the used range; leading empty rows/columns are kept so cell
//! addresses stay absolute (`A1`-anchored).

use crate::table::address::CellAddress;
use std::fmt;

/// One cell's value. `Empty` is the explicit empty marker; merged cells carry
/// their value only in the anchor cell, everything else in the merge is
/// `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Text form used for header labels and filter comparisons.
    ///
    /// Integral numbers print without a trailing `.0` so ID-like numeric
    /// cells compare cleanly against string filter values.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Self::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_owned(),
            Self::Empty => String::new(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_owned())
        }
    }
}

/// Immutable rectangular snapshot of one sheet's cell values.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Vec<CellValue>>,
    rows: usize,
    cols: usize,
}

impl Grid {
    const EMPTY: CellValue = CellValue::Empty;

    /// Build a grid from row-major values.
    ///
    /// Rows are padded to a common width, then trailing all-empty rows and
    /// columns are trimmed so the grid covers exactly the used range.
    pub fn from_rows(mut cells: Vec<Vec<CellValue>>) -> Self {
        // Drop trailing rows that contain no values.
        while cells
            .last()
            .is_some_and(|row| row.iter().all(CellValue::is_empty))
        {
            cells.pop();
        }

        let cols = cells
            .iter()
            .map(|row| {
                row.iter()
                    .rposition(|v| !v.is_empty())
                    .map_or(0, |i| i + 1)
            })
            .max()
            .unwrap_or(0);

        for row in &mut cells {
            row.truncate(cols);
            row.resize(cols, CellValue::Empty);
        }

        let rows = cells.len();
        Self { cells, rows, cols }
    }

    /// Value at (row, col); the empty marker when out of bounds.
    pub fn value_at(&self, row: usize, col: usize) -> &CellValue {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&Self::EMPTY)
    }

    /// (rows, cols) of the used range.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True iff every cell in the row is the empty marker (or the row is out
    /// of bounds).
    pub fn row_is_empty(&self, row: usize) -> bool {
        self.cells
            .get(row)
            .is_none_or(|r| r.iter().all(CellValue::is_empty))
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// The row's values as a slice; empty slice when out of bounds.
    pub fn row(&self, row: usize) -> &[CellValue] {
        self.cells.get(row).map_or(&[], Vec::as_slice)
    }

    /// Coordinate string for (row, col), e.g. `B7`.
    pub fn address(&self, row: usize, col: usize) -> String {
        CellAddress::new(row, col).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    #[test]
    fn test_trailing_empty_rows_and_cols_trimmed() {
        let grid = Grid::from_rows(vec![
            vec![text("a"), text("b"), CellValue::Empty],
            vec![text("c"), CellValue::Empty, CellValue::Empty],
            vec![CellValue::Empty, CellValue::Empty, CellValue::Empty],
        ]);
        assert_eq!(grid.dimensions(), (2, 2));
    }

    #[test]
    fn test_leading_empties_kept_for_absolute_addressing() {
        let grid = Grid::from_rows(vec![
            vec![CellValue::Empty, CellValue::Empty],
            vec![CellValue::Empty, text("Department")],
        ]);
        assert_eq!(grid.dimensions(), (2, 2));
        assert_eq!(grid.value_at(1, 1), &text("Department"));
        assert_eq!(grid.address(1, 1), "B2");
    }

    #[test]
    fn test_ragged_rows_padded() {
        let grid = Grid::from_rows(vec![vec![text("a")], vec![text("b"), text("c")]]);
        assert_eq!(grid.dimensions(), (2, 2));
        assert!(grid.value_at(0, 1).is_empty());
    }

    #[test]
    fn test_grid_is_empty_once_blank_rows_are_trimmed() {
        assert!(Grid::from_rows(vec![]).is_empty());
        assert!(Grid::from_rows(vec![vec![CellValue::Empty, CellValue::Empty]]).is_empty());
        assert!(!Grid::from_rows(vec![vec![text("a")]]).is_empty());
    }

    #[test]
    fn test_value_at_out_of_bounds_is_empty() {
        let grid = Grid::from_rows(vec![vec![text("a")]]);
        assert!(grid.value_at(5, 5).is_empty());
        assert!(grid.row_is_empty(99));
    }

    #[test]
    fn test_row_is_empty() {
        let grid = Grid::from_rows(vec![
            vec![text("a"), text("b")],
            vec![CellValue::Empty, CellValue::Empty],
            vec![text("c"), CellValue::Empty],
        ]);
        assert!(!grid.row_is_empty(0));
        assert!(grid.row_is_empty(1));
        assert!(!grid.row_is_empty(2));
    }

    #[test]
    fn test_number_text_drops_integral_fraction() {
        assert_eq!(CellValue::Number(42.0).as_text(), "42");
        assert_eq!(CellValue::Number(4.25).as_text(), "4.25");
        assert_eq!(CellValue::Number(-3.0).as_text(), "-3");
    }
}
