use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::batch::{BatchOptions, BatchReport, EntryStatus};
use crate::config::RunConfig;
use crate::error::SiftError;
use crate::mapping;
use crate::render::{render_extraction, render_sheet};
use crate::sink::{DirectorySink, ReportSink as _};
use crate::table::address::CellAddress;
use crate::table::extract::{extract, ExtractOptions, FilterCriterion};
use crate::table::locate::{MinPopulated, RegionSpec};
use crate::workbook::Workbook;

#[derive(Parser)]
#[command(name = "gridsift", about = "Extract and filter tabular data from spreadsheets", version)]
pub struct Cli {
    /// Path to a JSON run configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List sheets, or convert every sheet to an annotated Markdown report
    Sheets {
        /// Workbook to read (.xlsx, .xls, .xlsb, .ods)
        file: PathBuf,

        /// Write one Markdown report per sheet into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract a table from one sheet, optionally filtered on a column value
    Extract {
        /// Workbook to read
        file: PathBuf,

        /// Sheet name. Defaults to the configured sheet, then the first sheet.
        #[arg(short, long)]
        sheet: Option<String>,

        /// Header row start cell, e.g. A6. Auto-detected when omitted.
        #[arg(long)]
        start_cell: Option<String>,

        /// Comma-separated columns to include. Defaults to all header columns.
        #[arg(short, long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Column to filter on (case-insensitive name)
        #[arg(long, requires = "value")]
        filter_column: Option<String>,

        /// Value the filter column must equal (case-sensitive)
        #[arg(long, requires = "filter_column")]
        value: Option<String>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat zero matching rows as an error
        #[arg(long)]
        strict: bool,
    },
    /// Run one filtered extraction per entry of a key/value mapping file
    Batch {
        /// Workbook to read
        file: PathBuf,

        /// Sheet name. Defaults to the configured sheet, then the first sheet.
        #[arg(short, long)]
        sheet: Option<String>,

        /// Header row start cell, e.g. A6. Auto-detected when omitted.
        #[arg(long)]
        start_cell: Option<String>,

        /// Comma-separated columns to include. Defaults to all header columns.
        #[arg(short, long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Column to filter on (case-insensitive name)
        #[arg(long)]
        filter_column: String,

        /// JSON mapping file: output key -> filter value
        #[arg(short, long)]
        mapping: PathBuf,

        /// Report directory. Defaults to the configured output directory.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worker pool width. Defaults to one worker per core.
        #[arg(long)]
        workers: Option<usize>,

        /// Per-entry time budget in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

pub fn run_command(command: Commands, config: &RunConfig) -> Result<()> {
    match command {
        Commands::Sheets { file, output } => handle_sheets(&file, output),
        Commands::Extract {
            file,
            sheet,
            start_cell,
            columns,
            filter_column,
            value,
            output,
            strict,
        } => handle_extract(
            &file,
            sheet,
            start_cell,
            columns,
            filter_column,
            value,
            output,
            strict,
            config,
        ),
        Commands::Batch {
            file,
            sheet,
            start_cell,
            columns,
            filter_column,
            mapping,
            output,
            workers,
            timeout,
        } => handle_batch(
            &file,
            sheet,
            start_cell,
            columns,
            &filter_column,
            &mapping,
            output,
            workers,
            timeout,
            config,
        ),
    }
}

fn handle_sheets(file: &Path, output: Option<PathBuf>) -> Result<()> {
    let mut workbook = Workbook::open(file)?;

    let Some(output) = output else {
        for name in workbook.sheet_names() {
            println!("{name}");
        }
        return Ok(());
    };

    let sink = DirectorySink::new(output);
    let mut converted = 0usize;
    let mut failed = 0usize;
    for (name, grid) in workbook.load_all() {
        match grid {
            Ok(grid) => {
                let path = sink.write(&name, &render_sheet(&grid, &name))?;
                println!("{name} -> {}", path.display());
                converted += 1;
            }
            Err(err) => {
                tracing::warn!(sheet = %name, error = %err, "sheet skipped");
                failed += 1;
            }
        }
    }

    println!("Converted {converted} sheet(s), {failed} failed.");
    Ok(())
}

#[expect(clippy::too_many_arguments)]
fn handle_extract(
    file: &Path,
    sheet: Option<String>,
    start_cell: Option<String>,
    columns: Option<Vec<String>>,
    filter_column: Option<String>,
    value: Option<String>,
    output: Option<PathBuf>,
    strict: bool,
    config: &RunConfig,
) -> Result<()> {
    let mut workbook = Workbook::open(file)?;
    let sheet = sheet.or_else(|| config.default_sheet.clone());
    let grid = workbook.load_sheet(sheet.as_deref())?;

    let spec = region_spec(start_cell.as_deref())?;
    let heuristic = MinPopulated(config.min_header_cells);
    let options = ExtractOptions {
        columns: columns.as_deref(),
        heuristic: &heuristic,
        deadline: None,
    };
    let criterion = match (filter_column, value) {
        (Some(column), Some(value)) => Some(FilterCriterion::new(column, value)),
        _ => None,
    };

    let result = extract(&grid, &spec, criterion, &options)?;
    if strict && result.match_count == 0 {
        if let Some(c) = &result.criterion {
            return Err(SiftError::NoMatchingRows(c.value.clone()).into());
        }
    }

    let document = render_extraction(&result);
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &document)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            println!(
                "Wrote {} matching row(s) to {}",
                result.match_count,
                path.display()
            );
        }
        None => print!("{document}"),
    }
    Ok(())
}

#[expect(clippy::too_many_arguments)]
fn handle_batch(
    file: &Path,
    sheet: Option<String>,
    start_cell: Option<String>,
    columns: Option<Vec<String>>,
    filter_column: &str,
    mapping_path: &Path,
    output: Option<PathBuf>,
    workers: Option<usize>,
    timeout: Option<u64>,
    config: &RunConfig,
) -> Result<()> {
    let entries = mapping::load_mapping(mapping_path)?;
    tracing::info!(entries = entries.len(), "mapping loaded");

    let mut workbook = Workbook::open(file)?;
    let sheet = sheet.or_else(|| config.default_sheet.clone());
    let grid = workbook.load_sheet(sheet.as_deref())?;

    let spec = region_spec(start_cell.as_deref())?;
    let heuristic = MinPopulated(config.min_header_cells);
    let options = BatchOptions {
        columns: columns.as_deref(),
        heuristic: &heuristic,
        workers: workers.or(config.workers),
        entry_timeout: timeout
            .or(config.entry_timeout_secs)
            .map(Duration::from_secs),
        cancel: None,
    };

    let outcomes = crate::batch::run_batch(&grid, &spec, filter_column, &entries, &options)?;

    let sink = DirectorySink::new(output.unwrap_or_else(|| config.output_dir.clone()));
    for outcome in &outcomes {
        match &outcome.status {
            EntryStatus::Rendered { document, match_count } => {
                let path = sink.write(&outcome.key, document)?;
                println!(
                    "{}: {match_count} matching row(s) -> {}",
                    outcome.key,
                    path.display()
                );
            }
            EntryStatus::Failed(err) => println!("{}: FAILED ({err})", outcome.key),
            EntryStatus::NotAttempted => println!("{}: not attempted", outcome.key),
        }
    }

    let report = BatchReport::tally(&outcomes);
    println!("{}", report.summary());
    if report.failed > 0 {
        anyhow::bail!("{} batch entrie(s) failed", report.failed);
    }
    Ok(())
}

fn region_spec(start_cell: Option<&str>) -> Result<RegionSpec> {
    Ok(match start_cell {
        Some(address) => RegionSpec::Explicit(CellAddress::parse(address)?),
        None => RegionSpec::AutoDetect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_region_spec_parses_start_cell() {
        let spec = region_spec(Some("B7")).unwrap();
        assert!(matches!(spec, RegionSpec::Explicit(addr) if addr.to_string() == "B7"));
        assert!(matches!(region_spec(None).unwrap(), RegionSpec::AutoDetect));
    }

    #[test]
    fn test_region_spec_rejects_malformed_address() {
        assert!(region_spec(Some("7B")).is_err());
    }
}
