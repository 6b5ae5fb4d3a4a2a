use std::path::Path;

use crate::classify::{cross_compare, internal_conflicts};
use crate::error::CompareError;
use crate::load::load_table;
use crate::model::{CompareOptions, CompareReport, KeyField, Table};
use crate::price::compare_prices;
use crate::report::{write_report, RunInfo};

/// Compares two loaded tables. Prices are compared only when both tables
/// carry the price column.
#[must_use]
pub fn compare_tables(first: &Table, second: &Table) -> CompareReport {
    let barcode = cross_compare(&first.records, &second.records, KeyField::Barcode);
    let name = cross_compare(&first.records, &second.records, KeyField::Name);

    let prices = (first.has_price && second.has_price)
        .then(|| compare_prices(&barcode, &first.records, &second.records));
    if prices.is_none() {
        tracing::info!(
            first = %first.label,
            second = %second.label,
            "price column missing in at least one file, skipping price comparison"
        );
    }

    CompareReport {
        first_barcode_conflicts: internal_conflicts(&first.records, KeyField::Barcode),
        first_name_conflicts: internal_conflicts(&first.records, KeyField::Name),
        second_barcode_conflicts: internal_conflicts(&second.records, KeyField::Barcode),
        second_name_conflicts: internal_conflicts(&second.records, KeyField::Name),
        barcode,
        name,
        prices,
    }
}

/// Loads both files, compares them and writes all outputs to `out_dir`.
///
/// # Errors
///
/// Returns [`CompareError`] when an input cannot be read or lacks a
/// required column, or when an output cannot be written.
pub fn run(
    first: &Path,
    second: &Path,
    out_dir: &Path,
    options: &CompareOptions,
) -> Result<CompareReport, CompareError> {
    let table1 = load_table(first, "file1", options)?;
    let table2 = load_table(second, "file2", options)?;

    let report = compare_tables(&table1, &table2);
    let info = RunInfo {
        file1: first.display().to_string(),
        file2: second.display().to_string(),
        options: options.clone(),
    };
    write_report(out_dir, &report, &info)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::read_table;
    use crate::model::KeyStatus;

    fn table(label: &str, csv: &str) -> Table {
        read_table(csv.as_bytes(), label, &CompareOptions::default()).unwrap()
    }

    #[test]
    fn prices_skipped_without_column_in_both() {
        let first = table("file1", "barcode,name,price\n1,Tej,399\n");
        let second = table("file2", "barcode,name\n1,Tej\n");
        let report = compare_tables(&first, &second);
        assert!(report.prices.is_none());
        assert_eq!(report.barcode.count(KeyStatus::Match), 1);
    }

    #[test]
    fn full_comparison() {
        let first = table(
            "file1",
            "barcode,name,price\n1,Tej,399\n2,Vaj,899\n2,Vaj extra,999\n3,Sajt,1299\n",
        );
        let second = table("file2", "barcode,name,price\n1,Tej,449\n2,Vaj,799\n4,Kefir,299\n");
        let report = compare_tables(&first, &second);

        assert_eq!(report.barcode.count(KeyStatus::Match), 2);
        assert_eq!(report.barcode.count(KeyStatus::OnlyInFirst), 1);
        assert_eq!(report.barcode.count(KeyStatus::OnlyInSecond), 1);
        assert_eq!(report.first_barcode_conflicts.records.len(), 2);
        assert!(report.second_barcode_conflicts.records.is_empty());
        assert_eq!(report.name.count(KeyStatus::OnlyInFirst), 2);

        let prices = report.prices.unwrap();
        assert_eq!(prices.rows.len(), 2);
        assert_eq!(prices.summary.valid, 2);
    }
}
