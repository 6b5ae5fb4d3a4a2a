//! Column filter: copies a CSV while dropping columns listed in
//! `config/columns.yaml`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use kosar_core::ColumnsFile;

use crate::error::NormalizeError;

/// What a filter run kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSummary {
    pub rows: usize,
    /// Header of the written file, in input order.
    pub kept: Vec<String>,
    /// Configured columns that were present and removed.
    pub dropped: Vec<String>,
}

/// Copies `reader` to `writer`, removing every column listed in `columns`.
///
/// Listed columns absent from the input are ignored.
///
/// # Errors
///
/// Returns [`NormalizeError::Csv`] on a malformed header or row.
pub fn filter_columns<R: Read, W: Write>(
    reader: R,
    writer: W,
    columns: &ColumnsFile,
) -> Result<FilterSummary, NormalizeError> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let headers = rdr
        .headers()
        .map_err(|e| NormalizeError::csv("input header", e))?
        .clone();
    let (keep, dropped): (Vec<(usize, &str)>, Vec<(usize, &str)>) = headers
        .iter()
        .enumerate()
        .partition(|&(_, name)| !columns.is_dropped(name));

    let kept: Vec<String> = keep.iter().map(|(_, name)| (*name).to_string()).collect();
    wtr.write_record(&kept)
        .map_err(|e| NormalizeError::csv("output header", e))?;

    let mut rows = 0;
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| NormalizeError::csv(format!("input row {}", idx + 2), e))?;
        wtr.write_record(keep.iter().map(|(i, _)| record.get(*i).unwrap_or_default()))
            .map_err(|e| NormalizeError::csv(format!("output row {}", idx + 2), e))?;
        rows += 1;
    }
    wtr.flush().map_err(|e| NormalizeError::io(Path::new("<output>"), e))?;

    Ok(FilterSummary {
        rows,
        kept,
        dropped: dropped.into_iter().map(|(_, name)| name.to_string()).collect(),
    })
}

/// Filters the CSV at `input` into a new file at `output`.
///
/// # Errors
///
/// Returns [`NormalizeError::Io`] when either file cannot be opened and
/// [`NormalizeError::Csv`] on malformed rows.
pub fn filter_file(
    input: &Path,
    output: &Path,
    columns: &ColumnsFile,
) -> Result<FilterSummary, NormalizeError> {
    let reader = File::open(input).map_err(|e| NormalizeError::io(input, e))?;
    let writer = File::create(output).map_err(|e| NormalizeError::io(output, e))?;
    let summary = filter_columns(reader, writer, columns)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        rows = summary.rows,
        dropped = summary.dropped.len(),
        "filtered columns"
    );
    Ok(summary)
}
