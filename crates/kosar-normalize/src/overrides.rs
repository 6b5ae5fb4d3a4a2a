//! Manually curated exception lists for products whose automatic size
//! reconciliation is known to be wrong.
//!
//! Each table is a plain text file with one product name per line. Two of
//! the tables also carry a corrected secondary size (`"<number> <unit>"`) on
//! the line right after the product name. Tables are loaded once per batch
//! and only read afterwards.

use std::collections::HashSet;
use std::path::Path;

use kosar_core::{Quantity, Unit};

use crate::error::NormalizeError;
use crate::units::{normalize, parse_decimal};

/// File holding products whose declared size is larger than the
/// name-derived one and correct.
pub const DECLARED_LARGER_FILE: &str = "declared_larger.txt";
/// File holding products whose name-derived size is larger and correct.
pub const NAME_LARGER_FILE: &str = "name_larger.txt";
/// File holding products with a mass/volume disagreement to flip.
pub const UNITS_DIFFER_FILE: &str = "units_differ.txt";

/// A line-oriented lookup table keyed by exact product name.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    lines: Vec<String>,
    names: HashSet<String>,
}

impl OverrideTable {
    /// Builds a table from in-memory lines. Lines are trimmed.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .collect();
        let names = lines.iter().filter(|l| !l.is_empty()).cloned().collect();
        Self { lines, names }
    }

    /// Loads a table from `path`. A missing file yields an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::OverrideTable`] if the file exists but
    /// cannot be read.
    pub fn load(path: &Path) -> Result<Self, NormalizeError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let table = Self::from_lines(content.lines());
                tracing::debug!(path = %path.display(), entries = table.names.len(), "loaded override table");
                Ok(table)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "override table not found, using an empty table");
                Ok(Self::default())
            }
            Err(e) => Err(NormalizeError::OverrideTable {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Returns `true` if `name` is listed. Blank names never match.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        !name.is_empty() && self.names.contains(name)
    }

    /// Returns the line `offset` lines after the first line equal to `name`.
    #[must_use]
    pub fn value_at(&self, name: &str, offset: usize) -> Option<&str> {
        if name.is_empty() {
            return None;
        }
        let idx = self.lines.iter().position(|l| l == name)?;
        self.lines
            .get(idx.checked_add(offset)?)
            .map(String::as_str)
    }

    /// Returns the line right after `name`.
    #[must_use]
    pub fn value_after(&self, name: &str) -> Option<&str> {
        self.value_at(name, 1)
    }

    /// Parses the corrected size stored after `name`, normalized.
    ///
    /// Returns `None` when `name` is not listed or the value line is not a
    /// `"<number> <unit>"` pair.
    #[must_use]
    pub fn corrected_size(&self, name: &str) -> Option<Quantity> {
        self.value_after(name).and_then(parse_size_pair).map(normalize)
    }

    /// Number of listed names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The three override tables consulted during reconciliation.
#[derive(Debug, Clone, Default)]
pub struct OverrideTables {
    pub declared_larger: OverrideTable,
    pub name_larger: OverrideTable,
    pub units_differ: OverrideTable,
}

impl OverrideTables {
    /// Loads all three tables from `dir` using their fixed file names.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::OverrideTable`] if a present file cannot be read.
    pub fn load_dir(dir: &Path) -> Result<Self, NormalizeError> {
        Ok(Self {
            declared_larger: OverrideTable::load(&dir.join(DECLARED_LARGER_FILE))?,
            name_larger: OverrideTable::load(&dir.join(NAME_LARGER_FILE))?,
            units_differ: OverrideTable::load(&dir.join(UNITS_DIFFER_FILE))?,
        })
    }
}

/// Parses `"<number> <unit>"`, e.g. `"6 db"` or `"0,5 l"`.
fn parse_size_pair(raw: &str) -> Option<Quantity> {
    let mut parts = raw.split_whitespace();
    let value = parse_decimal(parts.next()?)?;
    let unit = Unit::from_token(parts.next()?);
    Some(Quantity::new(value, unit))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn table() -> OverrideTable {
        OverrideTable::from_lines([
            "Coca-Cola 6 x 1,75 l",
            "6 db",
            "  Túró Rudi 10 x 30 g  ",
            "10 db",
            "",
            "Lone entry",
        ])
    }

    #[test]
    fn contains_exact_trimmed_names() {
        let t = table();
        assert!(t.contains("Coca-Cola 6 x 1,75 l"));
        assert!(t.contains("Túró Rudi 10 x 30 g"));
        assert!(!t.contains("coca-cola 6 x 1,75 l"));
        assert!(!t.contains("Coca-Cola"));
    }

    #[test]
    fn blank_name_never_matches() {
        let t = table();
        assert!(!t.contains(""));
        assert!(t.value_after("").is_none());
    }

    #[test]
    fn value_after_returns_next_line() {
        let t = table();
        assert_eq!(t.value_after("Coca-Cola 6 x 1,75 l"), Some("6 db"));
        assert_eq!(t.value_at("Coca-Cola 6 x 1,75 l", 2), Some("Túró Rudi 10 x 30 g"));
    }

    #[test]
    fn value_after_last_line_is_none() {
        assert!(table().value_after("Lone entry").is_none());
    }

    #[test]
    fn value_after_unknown_name_is_none() {
        assert!(table().value_after("Nincs ilyen").is_none());
    }

    #[test]
    fn corrected_size_is_parsed_and_normalized() {
        let t = OverrideTable::from_lines(["Sör", "0,5 l"]);
        assert_eq!(
            t.corrected_size("Sör"),
            Some(Quantity::new(500.0, Unit::Milliliter))
        );
        assert_eq!(
            table().corrected_size("Túró Rudi 10 x 30 g"),
            Some(Quantity::new(10.0, Unit::Piece))
        );
    }

    #[test]
    fn corrected_size_malformed_is_none() {
        let t = OverrideTable::from_lines(["Sör", "sok"]);
        assert!(t.corrected_size("Sör").is_none());
        assert!(table().corrected_size("Lone entry").is_none());
    }

    #[test]
    fn len_counts_non_blank_names() {
        assert_eq!(table().len(), 5);
        assert!(OverrideTable::default().is_empty());
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let t = OverrideTable::load(&dir.path().join("missing.txt")).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn load_dir_reads_all_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join(NAME_LARGER_FILE)).unwrap();
        writeln!(f, "Pick Szeletelt 2 x 70 g\n2 db").unwrap();
        std::fs::write(dir.path().join(UNITS_DIFFER_FILE), "Tejföl 20%\n").unwrap();

        let tables = OverrideTables::load_dir(dir.path()).unwrap();
        assert!(tables.declared_larger.is_empty());
        assert_eq!(
            tables.name_larger.value_after("Pick Szeletelt 2 x 70 g"),
            Some("2 db")
        );
        assert!(tables.units_differ.contains("Tejföl 20%"));
    }
}
