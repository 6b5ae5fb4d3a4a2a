//! Batch normalization of a whole Spar export.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use kosar_core::OUTPUT_COLUMNS;

use crate::error::NormalizeError;
use crate::overrides::OverrideTables;
use crate::reconcile::Outcome;
use crate::spar::{normalize_spar_row, SparNormalized};
use crate::types::SparRow;

/// Per-run counters, one entry per reconciliation outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub rows: usize,
    outcomes: HashMap<Outcome, usize>,
    pub overrides_applied: usize,
    pub custom_applied: usize,
    /// Rows sized only by the one-piece default.
    pub fail_safe_defaults: usize,
}

impl NormalizeSummary {
    /// Adds one normalized row to the counters.
    pub fn record(&mut self, row: &SparNormalized) {
        self.rows += 1;
        *self.outcomes.entry(row.reconciliation.outcome).or_default() += 1;
        if row.reconciliation.override_applied {
            self.overrides_applied += 1;
        }
        if row.reconciliation.custom_applied {
            self.custom_applied += 1;
        }
        if row.candidates.fail_safe_used {
            self.fail_safe_defaults += 1;
        }
    }

    /// Number of rows that ended in `outcome`.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }
}

impl fmt::Display for NormalizeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rows={}", self.rows)?;
        for outcome in Outcome::ALL {
            write!(f, " {}={}", outcome, self.count(outcome))?;
        }
        write!(
            f,
            " overrides={} custom={} fail_safe={}",
            self.overrides_applied, self.custom_applied, self.fail_safe_defaults
        )
    }
}

/// Streams a Spar CSV from `reader` into the normalized layout on `writer`.
///
/// The header row is always written, even for an empty input.
///
/// # Errors
///
/// Returns [`NormalizeError::Csv`] when a row cannot be read or written.
pub fn normalize_csv<R: Read, W: Write>(
    reader: R,
    writer: W,
    overrides: &OverrideTables,
    store_name: &str,
) -> Result<NormalizeSummary, NormalizeError> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(OUTPUT_COLUMNS)
        .map_err(|e| NormalizeError::csv("output header", e))?;

    let mut summary = NormalizeSummary::default();
    for (idx, result) in rdr.deserialize::<SparRow>().enumerate() {
        let line = idx + 2;
        let row = result.map_err(|e| NormalizeError::csv(format!("input row {line}"), e))?;
        let normalized = normalize_spar_row(&row, overrides, store_name);
        log_row(&normalized);

        wtr.serialize(&normalized.product)
            .map_err(|e| NormalizeError::csv(format!("output row {line}"), e))?;
        summary.record(&normalized);
    }

    wtr.flush().map_err(|e| NormalizeError::io(Path::new("<output>"), e))?;
    Ok(summary)
}

fn log_row(row: &SparNormalized) {
    let name = row.product.product_name.as_str();
    if row.reconciliation.outcome == Outcome::BothEmpty {
        tracing::warn!(product = %name, "no size could be resolved");
    }
    if row.candidates.fail_safe_used {
        tracing::warn!(product = %name, "no size data, defaulting to one piece");
    }
    if row.reconciliation.override_applied {
        tracing::debug!(
            product = %name,
            outcome = %row.reconciliation.outcome,
            "override table entry applied"
        );
    }
}

/// Normalizes the CSV at `input` into a new file at `output`.
///
/// # Errors
///
/// Returns [`NormalizeError::Io`] when either file cannot be opened and
/// [`NormalizeError::Csv`] on malformed rows.
pub fn normalize_file(
    input: &Path,
    output: &Path,
    overrides: &OverrideTables,
    store_name: &str,
) -> Result<NormalizeSummary, NormalizeError> {
    let reader = File::open(input).map_err(|e| NormalizeError::io(input, e))?;
    let writer = File::create(output).map_err(|e| NormalizeError::io(output, e))?;
    let summary = normalize_csv(reader, writer, overrides, store_name)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        rows = summary.rows,
        "normalized product file"
    );
    Ok(summary)
}
