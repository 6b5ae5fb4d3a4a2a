use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Column names and matching options of a comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareOptions {
    pub barcode_col: String,
    pub name_col: String,
    /// Optional: price comparison is skipped unless both files have it.
    pub price_col: String,
    pub case_insensitive: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            barcode_col: "barcode".to_string(),
            name_col: "name".to_string(),
            price_col: "price".to_string(),
            case_insensitive: false,
        }
    }
}

/// One input row reduced to the three compared cells. Absent cells are
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub barcode: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
}

/// A loaded input file.
#[derive(Debug, Clone)]
pub struct Table {
    pub label: String,
    pub records: Vec<Record>,
    /// The price column was present in the header.
    pub has_price: bool,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Which column keys a comparison; the other column is the compared value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyField {
    Barcode,
    Name,
}

impl KeyField {
    #[must_use]
    pub fn key(self, record: &Record) -> Option<&str> {
        match self {
            KeyField::Barcode => record.barcode.as_deref(),
            KeyField::Name => record.name.as_deref(),
        }
    }

    #[must_use]
    pub fn value(self, record: &Record) -> Option<&str> {
        match self {
            KeyField::Barcode => record.name.as_deref(),
            KeyField::Name => record.barcode.as_deref(),
        }
    }

    #[must_use]
    pub fn key_column(self) -> &'static str {
        match self {
            KeyField::Barcode => "barcode",
            KeyField::Name => "name",
        }
    }

    #[must_use]
    pub fn value_column(self) -> &'static str {
        match self {
            KeyField::Barcode => "name",
            KeyField::Name => "barcode",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStatus {
    Match,
    Conflict,
    OnlyInFirst,
    OnlyInSecond,
}

impl KeyStatus {
    /// Classifies the values both files map one key to. `None` when neither
    /// file has a value.
    #[must_use]
    pub fn classify(first: Option<&str>, second: Option<&str>) -> Option<Self> {
        match (first, second) {
            (Some(a), Some(b)) if a == b => Some(KeyStatus::Match),
            (Some(_), Some(_)) => Some(KeyStatus::Conflict),
            (Some(_), None) => Some(KeyStatus::OnlyInFirst),
            (None, Some(_)) => Some(KeyStatus::OnlyInSecond),
            (None, None) => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            KeyStatus::Match => "match",
            KeyStatus::Conflict => "conflict",
            KeyStatus::OnlyInFirst => "only_in_file1",
            KeyStatus::OnlyInSecond => "only_in_file2",
        }
    }
}

/// One key of the cross-file comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossEntry {
    pub key: String,
    /// First value mapped to `key` in the first file.
    pub first: Option<String>,
    pub second: Option<String>,
    pub status: KeyStatus,
    /// `key` maps to several values inside the first file.
    pub internal_conflict_first: bool,
    pub internal_conflict_second: bool,
}

/// Every classified key of one cross-file comparison, sorted by key.
#[derive(Debug, Clone)]
pub struct CrossComparison {
    pub field: KeyField,
    pub entries: Vec<CrossEntry>,
}

impl CrossComparison {
    pub fn with_status(&self, status: KeyStatus) -> impl Iterator<Item = &CrossEntry> {
        self.entries.iter().filter(move |e| e.status == status)
    }

    #[must_use]
    pub fn count(&self, status: KeyStatus) -> usize {
        self.with_status(status).count()
    }
}

/// Rows of one file whose key maps to more than one distinct value.
#[derive(Debug, Clone)]
pub struct InternalConflicts {
    pub field: KeyField,
    /// Sorted by key, then value; absent values last.
    pub records: Vec<Record>,
}

impl InternalConflicts {
    /// Number of distinct `(key, value)` pairs among the conflicting rows.
    #[must_use]
    pub fn distinct_pairs(&self) -> usize {
        let mut pairs: Vec<(Option<&str>, Option<&str>)> = self
            .records
            .iter()
            .map(|r| (self.field.key(r), self.field.value(r)))
            .collect();
        pairs.dedup();
        pairs.len()
    }
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// Price comparison of one barcode match. Field names are the CSV header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    pub barcode: String,
    pub name: String,
    pub price_file1: Option<String>,
    pub price_file1_parsed: Option<f64>,
    pub price_file2: Option<String>,
    pub price_file2_parsed: Option<f64>,
    /// `file2 - file1`.
    pub abs_diff: Option<f64>,
    pub pct_vs_file1: Option<f64>,
    pub pct_symmetric: Option<f64>,
}

/// Mean and median of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Stat {
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    /// Barcode matches considered.
    pub comparable: usize,
    /// Rows with a parseable price in both files.
    pub valid: usize,
    pub missing: usize,
    pub abs_diff: Stat,
    pub pct_vs_file1: Stat,
    pub pct_symmetric: Stat,
}

#[derive(Debug, Clone)]
pub struct PriceComparison {
    pub rows: Vec<PriceRow>,
    pub summary: PriceSummary,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CompareReport {
    pub barcode: CrossComparison,
    pub name: CrossComparison,
    pub first_barcode_conflicts: InternalConflicts,
    pub first_name_conflicts: InternalConflicts,
    pub second_barcode_conflicts: InternalConflicts,
    pub second_name_conflicts: InternalConflicts,
    /// `None` when either file lacks the price column.
    pub prices: Option<PriceComparison>,
}
