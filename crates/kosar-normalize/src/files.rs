//! Timestamped data files: `<market>_<kind>_<YYYYMMDD_HHMMSS>.csv`.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{Local, NaiveDateTime};

use crate::error::NormalizeError;

/// `chrono` format of the stamp embedded in data file names.
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Raw scraped catalogue.
pub const ALL_DATA: &str = "all_data";
/// Catalogue with irrelevant columns removed.
pub const FILTERED_DATA: &str = "filtered_data";
/// Normalized product records.
pub const NORMALIZED_DATA: &str = "normalized_data";

/// A data file located on disk together with its name stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    pub path: PathBuf,
    pub stamp: String,
}

/// Formats the current local time as a file stamp.
#[must_use]
pub fn current_stamp() -> String {
    Local::now().format(STAMP_FORMAT).to_string()
}

/// Builds `<dir>/<market>_<kind>_<stamp>.csv`.
#[must_use]
pub fn dated_file_name(dir: &Path, market: &str, kind: &str, stamp: &str) -> PathBuf {
    dir.join(format!("{market}_{kind}_{stamp}.csv"))
}

/// Extracts the stamp from a file name of the form
/// `<market>_<kind>_<stamp>.csv`. The stamp must parse as [`STAMP_FORMAT`].
#[must_use]
pub fn parse_stamp<'a>(file_name: &'a str, market: &str, kind: &str) -> Option<&'a str> {
    let stamp = file_name
        .strip_prefix(market)?
        .strip_prefix('_')?
        .strip_prefix(kind)?
        .strip_prefix('_')?
        .strip_suffix(".csv")?;
    NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()?;
    Some(stamp)
}

/// Finds the most recently modified `<market>_<kind>_*.csv` file in `dir`.
///
/// Ties on modification time are broken by the later stamp.
///
/// # Errors
///
/// Returns [`NormalizeError::Io`] if `dir` cannot be listed and
/// [`NormalizeError::NoDataFile`] if nothing matches.
pub fn latest_data_file(dir: &Path, market: &str, kind: &str) -> Result<DataFile, NormalizeError> {
    let entries = std::fs::read_dir(dir).map_err(|e| NormalizeError::io(dir, e))?;

    let mut best: Option<(SystemTime, DataFile)> = None;
    for entry in entries {
        let entry = entry.map_err(|e| NormalizeError::io(dir, e))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(stamp) = parse_stamp(name, market, kind) else {
            continue;
        };
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .map_err(|e| NormalizeError::io(&entry.path(), e))?;

        let newer = best.as_ref().map_or(true, |(t, current)| {
            (modified, stamp) > (*t, current.stamp.as_str())
        });
        if newer {
            best = Some((
                modified,
                DataFile {
                    path: entry.path(),
                    stamp: stamp.to_string(),
                },
            ));
        }
    }

    let (_, file) = best.ok_or_else(|| NormalizeError::NoDataFile {
        dir: dir.display().to_string(),
        pattern: format!("{market}_{kind}_*.csv"),
    })?;
    tracing::debug!(path = %file.path.display(), stamp = %file.stamp, "selected latest data file");
    Ok(file)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn touch(dir: &Path, name: &str, age_secs: u64) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "id\n").unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(age_secs);
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(mtime).unwrap();
        path
    }

    #[test]
    fn dated_file_name_layout() {
        let path = dated_file_name(Path::new("/data"), "spar", NORMALIZED_DATA, "20240305_081500");
        assert_eq!(
            path,
            PathBuf::from("/data/spar_normalized_data_20240305_081500.csv")
        );
    }

    #[test]
    fn current_stamp_round_trips_through_format() {
        let stamp = current_stamp();
        assert_eq!(stamp.len(), 15);
        assert!(NaiveDateTime::parse_from_str(&stamp, STAMP_FORMAT).is_ok());
    }

    #[test]
    fn parse_stamp_requires_exact_shape() {
        assert_eq!(
            parse_stamp("spar_all_data_20240101_101010.csv", "spar", ALL_DATA),
            Some("20240101_101010")
        );
        assert!(parse_stamp("spar_all_data_latest.csv", "spar", ALL_DATA).is_none());
        assert!(parse_stamp("spar_all_data_20241301_101010.csv", "spar", ALL_DATA).is_none());
        assert!(parse_stamp("tesco_all_data_20240101_101010.csv", "spar", ALL_DATA).is_none());
        assert!(parse_stamp("spar_filtered_data_20240101_101010.csv", "spar", ALL_DATA).is_none());
        assert!(parse_stamp("spar_all_data_20240101_101010.txt", "spar", ALL_DATA).is_none());
    }

    #[test]
    fn latest_by_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "spar_all_data_20240102_000000.csv", 3600);
        let newest = touch(dir.path(), "spar_all_data_20240101_000000.csv", 10);
        touch(dir.path(), "spar_normalized_data_20240103_000000.csv", 0);
        touch(dir.path(), "notes.txt", 0);

        let file = latest_data_file(dir.path(), "spar", ALL_DATA).unwrap();
        assert_eq!(file.path, newest);
        assert_eq!(file.stamp, "20240101_000000");
    }

    #[test]
    fn no_matching_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "spar_filtered_data_20240101_000000.csv", 0);
        let err = latest_data_file(dir.path(), "spar", ALL_DATA).unwrap_err();
        assert!(matches!(err, NormalizeError::NoDataFile { .. }));
        assert!(err.to_string().contains("spar_all_data_*.csv"));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = latest_data_file(&dir.path().join("nope"), "spar", ALL_DATA).unwrap_err();
        assert!(matches!(err, NormalizeError::Io { .. }));
    }
}
