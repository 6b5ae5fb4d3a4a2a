//! Reading the two input files into [`Table`]s.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::{WINDOWS_1250, WINDOWS_1252};

use crate::error::CompareError;
use crate::model::{CompareOptions, Record, Table};

const BOM: char = '\u{feff}';

/// Bytes with no mapping in the cp1250 code page.
const CP1250_UNDEFINED: [u8; 5] = [0x81, 0x83, 0x88, 0x90, 0x98];

/// Decodes file contents as UTF-8, falling back to cp1250 and then latin-1.
///
/// Returns the text together with the name of the encoding used. Latin-1
/// is decoded as windows-1252, its WHATWG superset, and accepts any input.
#[must_use]
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, &'static str) {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return (Cow::Borrowed(text), "UTF-8");
    }
    if !bytes.iter().any(|b| CP1250_UNDEFINED.contains(b)) {
        let (text, _) = WINDOWS_1250.decode_without_bom_handling(bytes);
        return (text, WINDOWS_1250.name());
    }
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    (text, WINDOWS_1252.name())
}

/// Normalizes one cell: trimmed, with empty, `nan` and `none` (any case)
/// read as absent, optionally lower-cased.
#[must_use]
pub fn normalize_cell(raw: &str, lowercase: bool) -> Option<String> {
    let cell = raw.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("none") {
        return None;
    }
    Some(if lowercase {
        cell.to_lowercase()
    } else {
        cell.to_string()
    })
}

/// Reads a CSV with a header row from raw file contents, decoded with
/// [`decode_text`].
///
/// # Errors
///
/// Returns [`CompareError::MissingColumns`] when the barcode or name column
/// is absent and [`CompareError::Csv`] on malformed input.
pub fn read_table(
    bytes: &[u8],
    label: &str,
    options: &CompareOptions,
) -> Result<Table, CompareError> {
    let (text, encoding) = decode_text(bytes);
    if encoding != "UTF-8" {
        tracing::info!(label, encoding, "input is not UTF-8, decoded with fallback");
    }
    let mut rdr = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| CompareError::csv(label, e))?
        .iter()
        .map(|h| h.trim_start_matches(BOM).to_string())
        .collect();

    let position = |column: &str| headers.iter().position(|h| h == column);
    let price_idx = position(&options.price_col);
    let (barcode_idx, name_idx) = match (position(&options.barcode_col), position(&options.name_col)) {
        (Some(b), Some(n)) => (b, n),
        (b, n) => {
            let missing = [(b, &options.barcode_col), (n, &options.name_col)]
                .into_iter()
                .filter(|(idx, _)| idx.is_none())
                .map(|(_, col)| col.clone())
                .collect();
            return Err(CompareError::MissingColumns {
                label: label.to_string(),
                missing,
                available: headers,
            });
        }
    };

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|e| CompareError::csv(label, e))?;
        let cell = |idx: usize| row.get(idx).unwrap_or_default();
        records.push(Record {
            barcode: normalize_cell(cell(barcode_idx), false),
            name: normalize_cell(cell(name_idx), options.case_insensitive),
            price: price_idx.and_then(|idx| normalize_cell(cell(idx), false)),
        });
    }

    tracing::debug!(label, rows = records.len(), has_price = price_idx.is_some(), "loaded table");
    Ok(Table {
        label: label.to_string(),
        records,
        has_price: price_idx.is_some(),
    })
}

/// Opens and reads the CSV at `path`.
///
/// # Errors
///
/// See [`read_table`]; additionally [`CompareError::Io`] when the file
/// cannot be opened.
pub fn load_table(path: &Path, label: &str, options: &CompareOptions) -> Result<Table, CompareError> {
    let bytes = std::fs::read(path).map_err(|e| CompareError::io(path, e))?;
    read_table(&bytes, label, options)
}
