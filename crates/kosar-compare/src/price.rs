//! Price comparison of barcode matches.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{CrossComparison, KeyStatus, PriceComparison, PriceRow, PriceSummary, Record, Stat};

/// First numeric token: optional sign, a digit, then digits, whitespace,
/// dots and commas.
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d[\d\s.,]*").expect("valid price regex"));

/// Parses a price written in any common format: `"1 299 Ft"`, `"12,50"`,
/// `"1.234,50"`.
///
/// Whitespace is removed and commas become dots; when more than one dot
/// remains, all but the last are thousands separators.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    let token = PRICE_RE.find(raw.trim())?.as_str();
    let token: String = token
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let token = if token.matches('.').count() > 1 {
        let (int, frac) = token.rsplit_once('.')?;
        format!("{}.{frac}", int.replace('.', ""))
    } else {
        token
    };

    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The price of the first row per `(barcode, name)` pair.
fn first_prices(records: &[Record]) -> HashMap<(&str, &str), Option<&str>> {
    let mut prices = HashMap::new();
    for record in records {
        if let (Some(barcode), Some(name)) = (record.barcode.as_deref(), record.name.as_deref()) {
            prices.entry((barcode, name)).or_insert(record.price.as_deref());
        }
    }
    prices
}

/// Builds one [`PriceRow`] from the raw prices of both files.
#[must_use]
pub fn price_row(barcode: &str, name: &str, raw1: Option<&str>, raw2: Option<&str>) -> PriceRow {
    let p1 = raw1.and_then(parse_price);
    let p2 = raw2.and_then(parse_price);

    let abs_diff = p1.zip(p2).map(|(a, b)| b - a);
    let pct_vs_file1 = p1
        .zip(abs_diff)
        .filter(|(a, _)| a.abs() > 0.0)
        .map(|(a, d)| d / a * 100.0);
    let pct_symmetric = p1.zip(p2).and_then(|(a, b)| {
        let mean = (a + b) / 2.0;
        (mean > 0.0).then(|| (b - a).abs() / mean * 100.0)
    });

    PriceRow {
        barcode: barcode.to_string(),
        name: name.to_string(),
        price_file1: raw1.map(str::to_string),
        price_file1_parsed: p1,
        price_file2: raw2.map(str::to_string),
        price_file2_parsed: p2,
        abs_diff,
        pct_vs_file1,
        pct_symmetric,
    }
}

/// Compares the prices of every barcode match, keyed by the barcode and the
/// matched name.
#[must_use]
pub fn compare_prices(
    barcode: &CrossComparison,
    first: &[Record],
    second: &[Record],
) -> PriceComparison {
    let prices1 = first_prices(first);
    let prices2 = first_prices(second);

    let rows: Vec<PriceRow> = barcode
        .with_status(KeyStatus::Match)
        .filter_map(|entry| {
            let name = entry.first.as_deref()?;
            let key = (entry.key.as_str(), name);
            let raw1 = prices1.get(&key).copied().flatten();
            let raw2 = prices2.get(&key).copied().flatten();
            Some(price_row(&entry.key, name, raw1, raw2))
        })
        .collect();

    let summary = summarize(&rows);
    PriceComparison { rows, summary }
}

/// Mean and median of each metric over rows with both prices parsed.
#[must_use]
pub fn summarize(rows: &[PriceRow]) -> PriceSummary {
    let valid: Vec<&PriceRow> = rows
        .iter()
        .filter(|r| r.price_file1_parsed.is_some() && r.price_file2_parsed.is_some())
        .collect();

    let stat = |metric: fn(&PriceRow) -> Option<f64>| {
        Stat::from_values(valid.iter().filter_map(|r| metric(r)).collect())
    };

    PriceSummary {
        comparable: rows.len(),
        valid: valid.len(),
        missing: rows.len() - valid.len(),
        abs_diff: stat(|r| r.abs_diff),
        pct_vs_file1: stat(|r| r.pct_vs_file1),
        pct_symmetric: stat(|r| r.pct_symmetric),
    }
}

/// Rows with a symmetric difference, largest magnitude first.
#[must_use]
pub fn top_differences(rows: &[PriceRow]) -> Vec<PriceRow> {
    let mut top: Vec<PriceRow> = rows
        .iter()
        .filter(|r| r.pct_symmetric.is_some())
        .cloned()
        .collect();
    top.sort_by(|a, b| {
        let a = a.pct_symmetric.map_or(0.0, f64::abs);
        let b = b.pct_symmetric.map_or(0.0, f64::abs);
        b.total_cmp(&a)
    });
    top
}

impl Stat {
    /// Mean and median of `values`; both `None` when empty.
    #[must_use]
    pub fn from_values(mut values: Vec<f64>) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        values.sort_by(f64::total_cmp);
        #[allow(clippy::cast_precision_loss)]
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let mid = values.len() / 2;
        let median = if values.len() % 2 == 0 {
            (values[mid - 1] + values[mid]) / 2.0
        } else {
            values[mid]
        };
        Self {
            mean: Some(mean),
            median: Some(median),
        }
    }
}
