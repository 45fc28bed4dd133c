//! Column resolution against a located header row.
//!
//! Requested names match header labels case-insensitively after trimming.
//! No request means "all columns in header order". Duplicate header names
//! resolve to the last-seen column index, but the rendered label is always
//! the header text verbatim.

use crate::error::{Result, SiftError};
use crate::table::locate::{HeaderColumn, TableRegion};

/// Resolve a requested column projection to concrete (label, index) pairs.
///
/// With `requested = None` every header column is returned in left-to-right
/// order; duplicate labels are kept, each routed through the last-seen index
/// for that name. With an explicit request, the result order matches the
/// request and each label is the header's verbatim text.
///
/// # Errors
///
/// [`SiftError::ColumnNotFound`] naming the first request that does not
/// resolve.
pub fn resolve_columns(
    region: &TableRegion,
    requested: Option<&[String]>,
) -> Result<Vec<HeaderColumn>> {
    match requested {
        None => Ok(region
            .columns
            .iter()
            .map(|c| HeaderColumn {
                label: c.label.clone(),
                index: region.column_index(&c.label).unwrap_or(c.index),
            })
            .collect()),
        Some(names) => names
            .iter()
            .map(|name| {
                let index = region
                    .column_index(name)
                    .ok_or_else(|| SiftError::ColumnNotFound(name.clone()))?;
                let label = region
                    .columns
                    .iter()
                    .rev()
                    .find(|c| c.index == index)
                    .map_or_else(|| name.clone(), |c| c.label.clone());
                Ok(HeaderColumn { label, index })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::grid::{CellValue, Grid};
    use crate::table::locate::{locate, MinPopulated, RegionSpec};

    fn region_for(header: &[&str]) -> TableRegion {
        let grid = Grid::from_rows(vec![header
            .iter()
            .map(|s| CellValue::from(*s))
            .collect()]);
        locate(&grid, &RegionSpec::AutoDetect, &MinPopulated::default()).unwrap()
    }

    #[test]
    fn test_resolution_is_case_insensitive_and_trimmed() {
        let region = region_for(&["Name", "Job", "Department"]);
        let cols =
            resolve_columns(&region, Some(&["job".to_owned(), " NAME ".to_owned()])).unwrap();

        // Order matches the request; labels are the header text verbatim.
        assert_eq!(cols[0].label, "Job");
        assert_eq!(cols[0].index, 1);
        assert_eq!(cols[1].label, "Name");
        assert_eq!(cols[1].index, 0);
    }

    #[test]
    fn test_unknown_request_names_first_missing_column() {
        let region = region_for(&["Name", "Job"]);
        let err = resolve_columns(
            &region,
            Some(&["Job".to_owned(), "Missing".to_owned(), "Alsomissing".to_owned()]),
        )
        .unwrap_err();
        assert!(matches!(err, SiftError::ColumnNotFound(name) if name == "Missing"));
    }

    #[test]
    fn test_no_request_returns_all_in_header_order() {
        let region = region_for(&["A", "B", "C"]);
        let cols = resolve_columns(&region, None).unwrap();
        let labels: Vec<&str> = cols.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", "C"]);
    }

    #[test]
    fn test_duplicate_headers_last_index_wins_labels_verbatim() {
        let region = region_for(&["ID", "Name", "id"]);

        // Explicit selection of the duplicate name resolves to the last index
        // and reports that column's own label.
        let cols = resolve_columns(&region, Some(&["ID".to_owned()])).unwrap();
        assert_eq!(cols[0].index, 2);
        assert_eq!(cols[0].label, "id");

        // All-columns projection keeps both duplicate labels verbatim, each
        // indexing the last-seen column for that name.
        let all = resolve_columns(&region, None).unwrap();
        let pairs: Vec<(&str, usize)> =
            all.iter().map(|c| (c.label.as_str(), c.index)).collect();
        assert_eq!(pairs, [("ID", 2), ("Name", 1), ("id", 2)]);
    }
}
