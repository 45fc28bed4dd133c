//! # Gridsift - Spreadsheet Table Extraction and Filtering
//!
//! Gridsift pulls tabular data out of loosely-formatted spreadsheets: sheets
//! where the real table starts somewhere below title rows and notes, with a
//! header row followed by data rows. It locates the table (explicitly or by
//! heuristic), filters rows on a primary column, and renders deterministic
//! Markdown reports, one extraction per mapping entry in batch mode.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gridsift::table::extract::{extract, ExtractOptions, FilterCriterion};
//! use gridsift::table::locate::RegionSpec;
//! use gridsift::render::render_extraction;
//! use gridsift::workbook::Workbook;
//! use std::path::Path;
//!
//! # fn example() -> gridsift::error::Result<()> {
//! let mut workbook = Workbook::open(Path::new("dictionary.xlsx"))?;
//! let grid = workbook.load_sheet(None)?;
//!
//! let result = extract(
//!     &grid,
//!     &RegionSpec::AutoDetect,
//!     Some(FilterCriterion::new("TableID", "ENG001")),
//!     &ExtractOptions::default(),
//! )?;
//! println!("{}", render_extraction(&result));
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`table`]: grid model, cell addressing, table location, column
//!   resolution, and row filtering
//! - [`workbook`]: spreadsheet loading (xlsx, xls, xlsb, ods)
//! - [`render`]: deterministic Markdown output
//! - [`batch`]: parallel per-entry orchestration with isolated failures
//! - [`mapping`]: key/value mapping files driving batch runs
//! - [`sink`]: report storage
//! - [`error`]: error types and handling utilities

#![warn(clippy::all, rust_2018_idioms)]

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod render;
pub mod sink;
pub mod table;
pub mod workbook;
