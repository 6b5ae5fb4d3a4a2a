//! Handlers for the `normalize`, `filter` and `pipeline` commands.
//!
//! Paths not given on the command line are resolved against the configured
//! data directory and market.

use std::path::{Path, PathBuf};

use anyhow::Context;
use kosar_core::AppConfig;
use kosar_normalize::files::{parse_stamp, ALL_DATA, FILTERED_DATA, NORMALIZED_DATA};
use kosar_normalize::{
    current_stamp, dated_file_name, filter_file, latest_data_file, normalize_file, OverrideTables,
};

/// Resolves the input and output of a batch step producing `kind` files.
///
/// Without an input the newest `all_data` file is used. Without an output
/// the result goes to the data directory, stamped like the input when its
/// name carries a stamp and with the current time otherwise.
pub(crate) fn resolve_paths(
    config: &AppConfig,
    input: Option<&Path>,
    output: Option<&Path>,
    kind: &str,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    let (input, stamp) = match input {
        Some(path) => {
            let stamp = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| parse_stamp(n, &config.market, ALL_DATA))
                .map_or_else(current_stamp, str::to_string);
            (path.to_path_buf(), stamp)
        }
        None => {
            let latest = latest_data_file(&config.data_dir, &config.market, ALL_DATA)
                .context("no input given and no raw catalogue found")?;
            (latest.path, latest.stamp)
        }
    };

    let output = output.map_or_else(
        || dated_file_name(&config.data_dir, &config.market, kind, &stamp),
        Path::to_path_buf,
    );
    Ok((input, output))
}

fn load_overrides(dir: &Path) -> anyhow::Result<OverrideTables> {
    OverrideTables::load_dir(dir)
        .with_context(|| format!("failed to load override tables from {}", dir.display()))
}

/// Normalize one raw catalogue and print the outcome counts.
///
/// # Errors
///
/// Returns an error if no input can be found, an override table is
/// unreadable, or the CSV cannot be read or written.
pub(crate) fn run_normalize(
    config: &AppConfig,
    input: Option<&Path>,
    output: Option<&Path>,
    overrides: Option<&Path>,
) -> anyhow::Result<()> {
    let tables = load_overrides(overrides.unwrap_or(&config.overrides_dir))?;
    let (input, output) = resolve_paths(config, input, output, NORMALIZED_DATA)?;

    let summary = normalize_file(&input, &output, &tables, &config.store_name)
        .with_context(|| format!("failed to normalize {}", input.display()))?;

    println!("normalized {} rows -> {}", summary.rows, output.display());
    println!("{summary}");
    Ok(())
}

/// Drop the configured irrelevant columns from one CSV.
///
/// # Errors
///
/// Returns an error if the columns file is invalid or the CSV cannot be
/// read or written.
pub(crate) fn run_filter(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    columns: Option<&Path>,
) -> anyhow::Result<()> {
    let columns_path = columns.unwrap_or(&config.columns_path);
    let columns = kosar_core::load_columns(columns_path)?;

    let summary = filter_file(input, output, &columns)
        .with_context(|| format!("failed to filter {}", input.display()))?;

    println!(
        "filtered {} rows -> {} ({} columns kept, {} dropped)",
        summary.rows,
        output.display(),
        summary.kept.len(),
        summary.dropped.len()
    );
    Ok(())
}

/// Filter and normalize the newest raw catalogue of the configured market.
///
/// Both steps read the raw file; the filtered copy lacks columns the
/// normalizer needs.
///
/// # Errors
///
/// Returns an error if no raw catalogue exists or either step fails.
pub(crate) fn run_pipeline(config: &AppConfig) -> anyhow::Result<()> {
    let latest = latest_data_file(&config.data_dir, &config.market, ALL_DATA)
        .context("pipeline needs a raw catalogue in the data directory")?;
    tracing::info!(path = %latest.path.display(), market = %config.market, "pipeline input");

    let filtered = dated_file_name(&config.data_dir, &config.market, FILTERED_DATA, &latest.stamp);
    run_filter(config, &latest.path, &filtered, None)?;

    let normalized =
        dated_file_name(&config.data_dir, &config.market, NORMALIZED_DATA, &latest.stamp);
    run_normalize(config, Some(&latest.path), Some(&normalized), None)
}
