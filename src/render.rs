//! Markdown rendering for grids and extraction results.
//!
//! Two modes: full-grid reports annotate every non-empty cell with its
//! coordinate (`Engineering (B7)`) so a reader can point back into the
//! original sheet; filtered reports carry a metadata block and the projected
//! table without annotations. Rendering is pure and deterministic — identical
//! inputs produce byte-identical documents.

use crate::table::extract::ExtractionResult;
use crate::table::grid::Grid;

/// Render a whole sheet in full-grid mode.
///
/// Rows with no content are skipped from the table body but still counted in
/// the coordinates of later rows (the annotation is what keeps addresses
/// meaningful).
pub fn render_sheet(grid: &Grid, sheet_name: &str) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Sheet: {sheet_name}\n\n"));
    md.push_str("## Raw Data with Cell References\n\n");

    let (rows, cols) = grid.dimensions();
    if grid.is_empty() {
        md.push_str("No data found in worksheet.\n");
        push_sheet_summary(&mut md, 0, 0, sheet_name);
        return md;
    }

    let headers: Vec<String> = (1..=cols).map(|i| format!("Col {i}")).collect();
    let mut body = Vec::new();
    for row in 0..rows {
        if grid.row_is_empty(row) {
            continue;
        }
        let mut record = Vec::with_capacity(cols);
        for col in 0..cols {
            let value = grid.value_at(row, col);
            if value.is_empty() {
                record.push(String::new());
            } else {
                record.push(format!("{} ({})", value.as_text(), grid.address(row, col)));
            }
        }
        body.push(record);
    }

    let data_rows = body.len();
    if data_rows == 0 {
        md.push_str("No data found in worksheet.\n");
    } else {
        md.push_str(&markdown_table(&headers, &body));
    }

    push_sheet_summary(&mut md, data_rows, cols, sheet_name);
    md
}

fn push_sheet_summary(md: &mut String, data_rows: usize, cols: usize, sheet_name: &str) {
    md.push_str("\n## Summary for AI Analysis\n\n");
    md.push_str(&format!("- Total rows with data: {data_rows}\n"));
    md.push_str(&format!("- Total columns: {cols}\n"));
    md.push_str(&format!("- Sheet name: {sheet_name}\n"));
    md.push_str("- Cell references are included in parentheses for precise identification\n");
}

/// Render an extraction result in filtered mode.
pub fn render_extraction(result: &ExtractionResult) -> String {
    let mut md = String::new();

    match &result.criterion {
        Some(c) => md.push_str(&format!("# Filtered Data: {} = '{}'\n\n", c.column, c.value)),
        None => md.push_str("# Extracted Data\n\n"),
    }

    md.push_str("## Metadata\n\n");
    match &result.criterion {
        Some(c) => md.push_str(&format!("- Filter criteria: {} = '{}'\n", c.column, c.value)),
        None => md.push_str("- Filter criteria: none\n"),
    }
    md.push_str(&format!("- Data source starting cell: {}\n", result.start));
    md.push_str(&format!("- Total matching rows: {}\n", result.match_count));
    md.push_str(&format!(
        "- Columns included: {}\n",
        result.columns.join(", ")
    ));

    md.push_str("\n## Data Table\n\n");
    if result.rows.is_empty() {
        md.push_str("No matching rows.\n");
        return md;
    }

    let body: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.as_text()).collect())
        .collect();
    md.push_str(&markdown_table(&result.columns, &body));
    md
}

/// GitHub-style table with cells padded to the column width.
fn markdown_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count().max(3)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers, &widths);
    out.push('|');
    for width in &widths {
        out.push_str(&format!("{}|", "-".repeat(width + 2)));
    }
    out.push('\n');
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map_or("", String::as_str);
        let pad = width - cell.chars().count().min(*width);
        out.push_str(&format!(" {cell}{} |", " ".repeat(pad)));
    }
    out.push('\n');
}
