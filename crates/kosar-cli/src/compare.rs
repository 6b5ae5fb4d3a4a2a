//! Handler for the `compare` command.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use kosar_compare::{CompareOptions, KeyStatus};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// First CSV file
    pub file1: PathBuf,
    /// Second CSV file
    pub file2: PathBuf,
    /// Barcode column name
    #[arg(long, default_value = "barcode")]
    pub barcode_col: String,
    /// Product name column name
    #[arg(long, default_value = "name")]
    pub name_col: String,
    /// Price column name; price comparison is skipped unless both files have it
    #[arg(long, default_value = "price")]
    pub price_col: String,
    /// Directory for the result files
    #[arg(long, default_value = "comparison_results")]
    pub out_dir: PathBuf,
    /// Compare names case-insensitively
    #[arg(long)]
    pub case_insensitive: bool,
}

impl CompareArgs {
    fn options(&self) -> CompareOptions {
        CompareOptions {
            barcode_col: self.barcode_col.clone(),
            name_col: self.name_col.clone(),
            price_col: self.price_col.clone(),
            case_insensitive: self.case_insensitive,
        }
    }
}

/// Compare two product files and write the results to `--out-dir`.
///
/// # Errors
///
/// Returns an error if either file cannot be read or lacks a required
/// column, or if the results cannot be written.
pub(crate) fn run_compare(args: &CompareArgs) -> anyhow::Result<()> {
    let report = kosar_compare::run(&args.file1, &args.file2, &args.out_dir, &args.options())
        .with_context(|| {
            format!(
                "failed to compare {} with {}",
                args.file1.display(),
                args.file2.display()
            )
        })?;

    for (title, cmp) in [("barcode", &report.barcode), ("name", &report.name)] {
        println!(
            "by {title}: {} matches, {} conflicts, {} only in file1, {} only in file2",
            cmp.count(KeyStatus::Match),
            cmp.count(KeyStatus::Conflict),
            cmp.count(KeyStatus::OnlyInFirst),
            cmp.count(KeyStatus::OnlyInSecond),
        );
    }
    match &report.prices {
        Some(prices) => println!(
            "prices: {} comparable, {} with both prices",
            prices.summary.comparable, prices.summary.valid
        ),
        None => println!("prices: skipped, '{}' not in both files", args.price_col),
    }
    println!("results written to {}", args.out_dir.display());
    Ok(())
}
