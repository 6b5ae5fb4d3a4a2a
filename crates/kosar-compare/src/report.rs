//! Writing a [`CompareReport`] to an output directory.

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::CompareError;
use crate::model::{
    CompareOptions, CompareReport, CrossComparison, InternalConflicts, KeyStatus, PriceRow,
    PriceSummary,
};
use crate::price::top_differences;

/// Output CSVs start with a BOM so spreadsheet tools pick UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Where the compared files came from; printed in the summaries.
#[derive(Debug, Clone, Serialize)]
pub struct RunInfo {
    pub file1: String,
    pub file2: String,
    #[serde(flatten)]
    pub options: CompareOptions,
}

#[derive(Debug, Serialize)]
struct StatusCounts {
    matches: usize,
    conflicts: usize,
    only_in_file1: usize,
    only_in_file2: usize,
}

impl StatusCounts {
    fn of(cmp: &CrossComparison) -> Self {
        Self {
            matches: cmp.count(KeyStatus::Match),
            conflicts: cmp.count(KeyStatus::Conflict),
            only_in_file1: cmp.count(KeyStatus::OnlyInFirst),
            only_in_file2: cmp.count(KeyStatus::OnlyInSecond),
        }
    }
}

#[derive(Debug, Serialize)]
struct InternalCounts {
    file1_barcode: usize,
    file1_name: usize,
    file2_barcode: usize,
    file2_name: usize,
}

#[derive(Debug, Serialize)]
struct SummaryJson<'a> {
    run: &'a RunInfo,
    barcode: StatusCounts,
    name: StatusCounts,
    internal_conflicts: InternalCounts,
    price: Option<&'a PriceSummary>,
}

/// Writes every output file of `report` into `out_dir`, creating it.
///
/// # Errors
///
/// Returns [`CompareError::Io`] or [`CompareError::Csv`] when a file cannot
/// be written.
pub fn write_report(out_dir: &Path, report: &CompareReport, info: &RunInfo) -> Result<(), CompareError> {
    std::fs::create_dir_all(out_dir).map_err(|e| CompareError::io(out_dir, e))?;

    for (cmp, prefix) in [(&report.barcode, "barcode"), (&report.name, "name")] {
        for (status, suffix) in [
            (KeyStatus::Match, "matches"),
            (KeyStatus::Conflict, "conflicts"),
            (KeyStatus::OnlyInFirst, "only_in_file1"),
            (KeyStatus::OnlyInSecond, "only_in_file2"),
        ] {
            write_cross(&out_dir.join(format!("{prefix}_{suffix}.csv")), cmp, status)?;
        }
    }

    for (conflicts, file) in [
        (&report.first_barcode_conflicts, "internal_file1_barcode_conflicts.csv"),
        (&report.second_barcode_conflicts, "internal_file2_barcode_conflicts.csv"),
        (&report.first_name_conflicts, "internal_file1_name_conflicts.csv"),
        (&report.second_name_conflicts, "internal_file2_name_conflicts.csv"),
    ] {
        write_internal(&out_dir.join(file), conflicts)?;
    }

    if let Some(prices) = &report.prices {
        write_prices(&out_dir.join("price_differences.csv"), &prices.rows)?;
        write_prices(
            &out_dir.join("top_price_differences.csv"),
            &top_differences(&prices.rows),
        )?;
        write_text(&out_dir.join("price_summary.txt"), &price_summary_text(&prices.summary))?;
    }

    write_text(&out_dir.join("summary.txt"), &summary_text(report, info))?;

    let json = SummaryJson {
        run: info,
        barcode: StatusCounts::of(&report.barcode),
        name: StatusCounts::of(&report.name),
        internal_conflicts: InternalCounts {
            file1_barcode: report.first_barcode_conflicts.distinct_pairs(),
            file1_name: report.first_name_conflicts.distinct_pairs(),
            file2_barcode: report.second_barcode_conflicts.distinct_pairs(),
            file2_name: report.second_name_conflicts.distinct_pairs(),
        },
        price: report.prices.as_ref().map(|p| &p.summary),
    };
    write_text(&out_dir.join("summary.json"), &serde_json::to_string_pretty(&json)?)?;

    tracing::info!(out_dir = %out_dir.display(), "wrote comparison results");
    Ok(())
}

/// Opens `path` for CSV output. Headers are written explicitly.
fn csv_writer(path: &Path) -> Result<csv::Writer<File>, CompareError> {
    let mut file = File::create(path).map_err(|e| CompareError::io(path, e))?;
    file.write_all(UTF8_BOM).map_err(|e| CompareError::io(path, e))?;
    Ok(csv::WriterBuilder::new().has_headers(false).from_writer(file))
}

fn finish(mut wtr: csv::Writer<File>, path: &Path) -> Result<(), CompareError> {
    wtr.flush().map_err(|e| CompareError::io(path, e))
}

fn write_cross(path: &Path, cmp: &CrossComparison, status: KeyStatus) -> Result<(), CompareError> {
    let ctx = || path.display().to_string();
    let mut wtr = csv_writer(path)?;
    let key = cmp.field.key_column();
    let value = cmp.field.value_column();
    wtr.write_record([
        key.to_string(),
        format!("{value}_file1"),
        format!("{value}_file2"),
        "status".to_string(),
        "internal_conflict_file1".to_string(),
        "internal_conflict_file2".to_string(),
    ])
    .map_err(|e| CompareError::csv(ctx(), e))?;

    for entry in cmp.with_status(status) {
        wtr.write_record([
            entry.key.as_str(),
            entry.first.as_deref().unwrap_or_default(),
            entry.second.as_deref().unwrap_or_default(),
            entry.status.label(),
            bool_cell(entry.internal_conflict_first),
            bool_cell(entry.internal_conflict_second),
        ])
        .map_err(|e| CompareError::csv(ctx(), e))?;
    }
    finish(wtr, path)
}

fn bool_cell(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn write_internal(path: &Path, conflicts: &InternalConflicts) -> Result<(), CompareError> {
    let mut wtr = csv_writer(path)?;
    wtr.write_record(["barcode", "name", "price"])
        .map_err(|e| CompareError::csv(path.display().to_string(), e))?;
    for record in &conflicts.records {
        wtr.serialize(record)
            .map_err(|e| CompareError::csv(path.display().to_string(), e))?;
    }
    finish(wtr, path)
}

fn write_prices(path: &Path, rows: &[PriceRow]) -> Result<(), CompareError> {
    let mut wtr = csv_writer(path)?;
    wtr.write_record(PRICE_COLUMNS)
        .map_err(|e| CompareError::csv(path.display().to_string(), e))?;
    for row in rows {
        wtr.serialize(row)
            .map_err(|e| CompareError::csv(path.display().to_string(), e))?;
    }
    finish(wtr, path)
}

const PRICE_COLUMNS: [&str; 9] = [
    "barcode",
    "name",
    "price_file1",
    "price_file1_parsed",
    "price_file2",
    "price_file2_parsed",
    "abs_diff",
    "pct_vs_file1",
    "pct_symmetric",
];

fn write_text(path: &Path, content: &str) -> Result<(), CompareError> {
    std::fs::write(path, content).map_err(|e| CompareError::io(path, e))
}

fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "nan".to_string(), |v| format!("{v:.2}"))
}

/// Renders `price_summary.txt`.
#[must_use]
pub fn price_summary_text(summary: &PriceSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Price Comparison Summary ===");
    let _ = writeln!(out, "Comparable (barcode+name matches) rows: {}", summary.comparable);
    let _ = writeln!(out, "Rows with parseable prices in both files: {}", summary.valid);
    let _ = writeln!(out, "Rows with missing/unparseable price(s): {}\n", summary.missing);
    let _ = writeln!(out, "--- Absolute difference (file2 - file1) ---");
    let _ = writeln!(
        out,
        "Mean: {} | Median: {}\n",
        fmt_stat(summary.abs_diff.mean),
        fmt_stat(summary.abs_diff.median)
    );
    let _ = writeln!(out, "--- % difference vs file1 ---");
    let _ = writeln!(
        out,
        "Mean: {}% | Median: {}%\n",
        fmt_stat(summary.pct_vs_file1.mean),
        fmt_stat(summary.pct_vs_file1.median)
    );
    let _ = writeln!(out, "--- Symmetric % difference ---");
    let _ = writeln!(
        out,
        "Mean: {}% | Median: {}%",
        fmt_stat(summary.pct_symmetric.mean),
        fmt_stat(summary.pct_symmetric.median)
    );
    out
}

/// Renders `summary.txt`.
#[must_use]
pub fn summary_text(report: &CompareReport, info: &RunInfo) -> String {
    let opts = &info.options;
    let mut out = String::new();
    let _ = writeln!(out, "=== Summary ===");
    let _ = writeln!(out, "File1: {}", info.file1);
    let _ = writeln!(out, "File2: {}", info.file2);
    let _ = writeln!(
        out,
        "Columns: barcode='{}', name='{}', price='{}'",
        opts.barcode_col, opts.name_col, opts.price_col
    );
    let _ = writeln!(out, "Case-insensitive name compare: {}\n", opts.case_insensitive);

    for (title, cmp) in [("BARCODE", &report.barcode), ("NAME", &report.name)] {
        let counts = StatusCounts::of(cmp);
        let _ = writeln!(out, "--- Cross-file by {title} ---");
        let _ = writeln!(out, "Matches: {}", counts.matches);
        let _ = writeln!(out, "Conflicts: {}", counts.conflicts);
        let _ = writeln!(out, "Only in file1: {}", counts.only_in_file1);
        let _ = writeln!(out, "Only in file2: {}\n", counts.only_in_file2);
    }

    let _ = writeln!(out, "--- Internal conflicts (within files) ---");
    let _ = writeln!(
        out,
        "File1: barcode->name conflicts: {}",
        report.first_barcode_conflicts.distinct_pairs()
    );
    let _ = writeln!(
        out,
        "File1: name->barcode conflicts: {}",
        report.first_name_conflicts.distinct_pairs()
    );
    let _ = writeln!(
        out,
        "File2: barcode->name conflicts: {}",
        report.second_barcode_conflicts.distinct_pairs()
    );
    let _ = writeln!(
        out,
        "File2: name->barcode conflicts: {}\n",
        report.second_name_conflicts.distinct_pairs()
    );

    if report.prices.is_some() {
        let _ = writeln!(out, "--- Price comparison outputs ---");
        let _ = writeln!(
            out,
            "price_differences.csv, top_price_differences.csv, price_summary.txt"
        );
    } else {
        let _ = writeln!(out, "--- Price comparison skipped ---");
        let _ = writeln!(
            out,
            "Reason: price column '{}' not present in both files.",
            opts.price_col
        );
    }
    out
}
