//! Spreadsheet loading via calamine.
//!
//! Thin collaborator between on-disk workbooks and the [`Grid`] model. The
//! only subtlety: calamine ranges are anchored at the first used cell, so
//! every coordinate gets the range's start offset added back to keep grid
//! addresses absolute (`A1`-anchored).

use crate::error::{Result, SiftError};
use crate::table::grid::{CellValue, Grid};
use calamine::{open_workbook_auto, Data, Reader as _, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// An open workbook handle.
pub struct Workbook {
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    /// Open a workbook of any supported format (`.xlsx`, `.xls`, `.xlsb`,
    /// `.ods`).
    ///
    /// # Errors
    ///
    /// [`SiftError::Workbook`] when the file cannot be opened or parsed.
    pub fn open(path: &Path) -> Result<Self> {
        let sheets = open_workbook_auto(path)
            .map_err(|e| SiftError::Workbook(format!("{}: {e}", path.display())))?;
        Ok(Self { sheets })
    }

    /// Names of all sheets, in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names().to_owned()
    }

    /// Load one sheet into a grid. `None` loads the first sheet.
    ///
    /// # Errors
    ///
    /// [`SiftError::SheetNotFound`] when the named sheet does not exist.
    pub fn load_sheet(&mut self, name: Option<&str>) -> Result<Grid> {
        let names = self.sheet_names();
        let name = match name {
            Some(n) => {
                if !names.iter().any(|s| s == n) {
                    return Err(SiftError::SheetNotFound(n.to_owned()));
                }
                n.to_owned()
            }
            None => names
                .first()
                .cloned()
                .ok_or_else(|| SiftError::SheetNotFound("<first sheet>".to_owned()))?,
        };

        let range = self.sheets.worksheet_range(&name)?;
        let (start_row, start_col) = range
            .start()
            .map_or((0, 0), |(r, c)| (r as usize, c as usize));
        let (end_row, end_col) = range.end().map_or((0, 0), |(r, c)| (r as usize, c as usize));

        if range.is_empty() {
            return Ok(Grid::from_rows(Vec::new()));
        }

        let mut rows = vec![vec![CellValue::Empty; end_col + 1]; end_row + 1];
        // Iterator coordinates are relative to range.start().
        for (row, col, data) in range.used_cells() {
            rows[start_row + row][start_col + col] = convert_value(data);
        }

        tracing::debug!(sheet = %name, rows = end_row + 1, cols = end_col + 1, "sheet loaded");
        Ok(Grid::from_rows(rows))
    }

    /// Load every sheet, pairing each name with its grid. Per-sheet failures
    /// are returned in place so one bad sheet does not abort the rest.
    pub fn load_all(&mut self) -> Vec<(String, Result<Grid>)> {
        self.sheet_names()
            .iter()
            .map(|name| (name.clone(), self.load_sheet(Some(name))))
            .collect()
    }
}

fn convert_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Dates render as text; the engine compares and prints strings.
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::Text(naive.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("{e}")),
    }
}
