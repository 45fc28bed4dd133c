//! Integration tests for the full extraction workflow
//!
//! These tests run the complete pipeline on in-memory grids and mapping
//! files, through to rendered reports on disk.

use gridsift::batch::{run_batch, BatchOptions, EntryStatus};
use gridsift::mapping::parse_mapping;
use gridsift::render::{render_extraction, render_sheet};
use gridsift::sink::{DirectorySink, ReportSink as _};
use gridsift::table::address::CellAddress;
use gridsift::table::extract::{extract, ExtractOptions, FilterCriterion};
use gridsift::table::grid::{CellValue, Grid};
use gridsift::table::locate::RegionSpec;
use tempfile::tempdir;

fn grid(rows: &[&[&str]]) -> Grid {
    Grid::from_rows(
        rows.iter()
            .map(|r| r.iter().map(|s| CellValue::from(*s)).collect())
            .collect(),
    )
}

/// A data dictionary sheet in the shape these tools are built for: banner
/// rows, blank padding, the real header at A6, data, then an empty row with
/// stray notes below it.
fn dictionary() -> Grid {
    grid(&[
        &["Corporate Data Dictionary", "", "", ""],
        &["Maintained by the BI team", "", "", ""],
        &["", "", "", ""],
        &["Last updated: 2024-08-01", "", "", ""],
        &["", "", "", ""],
        &["TableID", "Column Name", "Type", "Description"],
        &["ENG001", "user_id", "INT", "Primary key"],
        &["ENG001", "email", "VARCHAR", "Login email"],
        &["MKT001", "campaign", "VARCHAR", "Campaign code"],
        &["ENG001", "created_at", "TIMESTAMP", "Row creation time"],
        &["", "", "", ""],
        &["Internal use only", "", "", ""],
    ])
}

#[test]
fn test_explicit_start_cell_end_to_end() {
    let g = dictionary();
    let result = extract(
        &g,
        &RegionSpec::Explicit(CellAddress::parse("A6").unwrap()),
        Some(FilterCriterion::new("tableid", "ENG001")),
        &ExtractOptions::default(),
    )
    .unwrap();

    assert_eq!(result.match_count, 3);
    assert_eq!(
        result.columns,
        ["TableID", "Column Name", "Type", "Description"]
    );

    let doc = render_extraction(&result);
    assert!(doc.starts_with("# Filtered Data: tableid = 'ENG001'\n"));
    assert!(doc.contains("- Data source starting cell: A6"));
    assert!(doc.contains("- Total matching rows: 3"));
    assert!(doc.contains("| user_id"));
    assert!(doc.contains("| created_at"));
    // The note below the terminating empty row never reaches the report.
    assert!(!doc.contains("Internal use only"));
}

#[test]
fn test_auto_detection_matches_explicit_result() {
    let g = dictionary();
    let explicit = extract(
        &g,
        &RegionSpec::Explicit(CellAddress::parse("A6").unwrap()),
        Some(FilterCriterion::new("TableID", "MKT001")),
        &ExtractOptions::default(),
    )
    .unwrap();
    let detected = extract(
        &g,
        &RegionSpec::AutoDetect,
        Some(FilterCriterion::new("TableID", "MKT001")),
        &ExtractOptions::default(),
    )
    .unwrap();

    assert_eq!(detected.start, explicit.start);
    assert_eq!(render_extraction(&detected), render_extraction(&explicit));
}

#[test]
fn test_batch_from_mapping_file_to_reports_on_disk() {
    let g = dictionary();
    let entries = parse_mapping(
        r#"{
            "engineering_tables": "ENG001",
            "marketing_tables": "MKT001",
            "finance_tables": "FIN001"
        }"#,
    )
    .unwrap();

    let outcomes = run_batch(
        &g,
        &RegionSpec::AutoDetect,
        "TableID",
        &entries,
        &BatchOptions::default(),
    )
    .unwrap();
    assert_eq!(outcomes.len(), 3);

    let temp = tempdir().unwrap();
    let sink = DirectorySink::new(temp.path());
    for outcome in &outcomes {
        let EntryStatus::Rendered { document, .. } = &outcome.status else {
            panic!("entry {} should render", outcome.key);
        };
        sink.write(&outcome.key, document).unwrap();
    }

    let eng = std::fs::read_to_string(temp.path().join("engineering_tables.md")).unwrap();
    assert!(eng.contains("- Total matching rows: 3"));

    // FIN001 matches nothing, but still gets a well-formed report.
    let fin = std::fs::read_to_string(temp.path().join("finance_tables.md")).unwrap();
    assert!(fin.contains("- Total matching rows: 0"));
    assert!(fin.contains("No matching rows."));
}

#[test]
fn test_column_projection_with_duplicate_headers() {
    let g = grid(&[
        &["ID", "Name", "id"],
        &["old", "Ada", "new"],
    ]);
    let result = extract(
        &g,
        &RegionSpec::AutoDetect,
        None,
        &ExtractOptions::default(),
    )
    .unwrap();

    // Both "ID" and "id" resolve to the rightmost duplicate's data; labels
    // stay as written in the header row.
    assert_eq!(result.columns, ["ID", "Name", "id"]);
    assert_eq!(result.rows[0][0].as_text(), "new");
    assert_eq!(result.rows[0][2].as_text(), "new");
}

#[test]
fn test_full_sheet_report_round_trips_addresses() {
    let g = dictionary();
    let doc = render_sheet(&g, "Dictionary");

    assert!(doc.contains("Corporate Data Dictionary (A1)"));
    assert!(doc.contains("TableID (A6)"));
    assert!(doc.contains("Campaign code (D9)"));
    // Blank rows are skipped from the body but addresses stay absolute.
    assert!(doc.contains("- Total rows with data: 9"));
}
