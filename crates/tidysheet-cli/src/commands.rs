//! Command implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use tidysheet_ingest::read_table;
use tidysheet_model::{KeywordSets, PipelineOptions, SemanticRole};
use tidysheet_normalize::{NormalizeReport, normalize};
use tidysheet_output::{write_csv, write_xlsx};

use crate::cli::{CleanArgs, OutputFormatArg};
use crate::summary::apply_table_style;

/// Result of a `clean` run, for the summary printer.
#[derive(Debug)]
pub struct CleanResult {
    pub input: PathBuf,
    pub report: NormalizeReport,
    pub xlsx_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let span = info_span!("clean", input = %args.input.display());
    let _guard = span.enter();

    let raw = read_table(&args.input)
        .with_context(|| format!("read source table {}", args.input.display()))?;
    info!(
        rows = raw.row_count(),
        columns = raw.column_count(),
        "source table loaded"
    );

    let options = PipelineOptions::new().with_header_scan_window(args.scan_window);
    let report = normalize(&raw, &options);

    let mut result = CleanResult {
        input: args.input.clone(),
        report,
        xlsx_path: None,
        csv_path: None,
    };
    if args.dry_run {
        return Ok(result);
    }

    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => args
            .input
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let stem = args
        .input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("table");

    if matches!(args.format, OutputFormatArg::Xlsx | OutputFormatArg::Both) {
        let path = output_dir.join(format!("{stem}_cleaned.xlsx"));
        write_xlsx(&result.report.table, &path)
            .with_context(|| format!("write xlsx output {}", path.display()))?;
        result.xlsx_path = Some(path);
    }
    if matches!(args.format, OutputFormatArg::Csv | OutputFormatArg::Both) {
        let path = output_dir.join(format!("{stem}_cleaned.csv"));
        write_csv(&result.report.table, &path)
            .with_context(|| format!("write csv output {}", path.display()))?;
        result.csv_path = Some(path);
    }
    Ok(result)
}

pub fn run_roles() -> Result<()> {
    let keywords = KeywordSets::default();
    let mut table = Table::new();
    table.set_header(vec!["Role", "Keywords"]);
    apply_table_style(&mut table);
    for role in SemanticRole::PRIORITY {
        table.add_row(vec![
            role.to_string(),
            keywords.for_role(role).join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}
