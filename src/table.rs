//! The grid extraction engine.
//!
//! Everything between "a sheet full of cells" and "the rows you asked for"
//! lives here:
//!
//! - [`address`]: cell address codec (`(row, col)` ↔ `B6`)
//! - [`grid`]: immutable dense model of one sheet's values
//! - [`locate`]: header-row location, explicit or heuristic
//! - [`resolve`]: case-insensitive column name resolution
//! - [`extract`]: row filtering and projection
//!
//! The composing operation is [`extract::extract`]: locate the table region,
//! resolve the projection, scan rows below the header until the first empty
//! row, keep the rows matching the criterion (or all of them), project onto
//! the resolved columns.

pub mod address;
pub mod extract;
pub mod grid;
pub mod locate;
pub mod resolve;

pub use address::CellAddress;
pub use extract::{extract, ExtractOptions, ExtractionResult, FilterCriterion, TimeBudget};
pub use grid::{CellValue, Grid};
pub use locate::{HeaderColumn, HeaderHeuristic, MinPopulated, RegionSpec, TableRegion};
pub use resolve::resolve_columns;
