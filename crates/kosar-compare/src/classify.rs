use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::model::{CrossComparison, CrossEntry, InternalConflicts, KeyField, KeyStatus, Record};

/// Keys that map to more than one distinct present value within `records`.
fn conflicting_keys(records: &[Record], field: KeyField) -> HashSet<&str> {
    let mut values: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        let Some(key) = field.key(record) else {
            continue;
        };
        let distinct = values.entry(key).or_default();
        if let Some(value) = field.value(record) {
            distinct.insert(value);
        }
    }
    values
        .into_iter()
        .filter(|(_, distinct)| distinct.len() > 1)
        .map(|(key, _)| key)
        .collect()
}

/// Rows of `records` whose key is ambiguous, sorted by key then value.
#[must_use]
pub fn internal_conflicts(records: &[Record], field: KeyField) -> InternalConflicts {
    let keys = conflicting_keys(records, field);
    let mut rows: Vec<Record> = records
        .iter()
        .filter(|r| field.key(r).is_some_and(|k| keys.contains(k)))
        .cloned()
        .collect();
    rows.sort_by(|a, b| {
        field.key(a).cmp(&field.key(b)).then_with(|| {
            // Absent values sort last.
            match (field.value(a), field.value(b)) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        })
    });
    InternalConflicts {
        field,
        records: rows,
    }
}

/// The value of the first row carrying each key. That value may be absent.
fn first_mapping(records: &[Record], field: KeyField) -> BTreeMap<&str, Option<&str>> {
    let mut map = BTreeMap::new();
    for record in records {
        if let Some(key) = field.key(record) {
            map.entry(key).or_insert_with(|| field.value(record));
        }
    }
    map
}

/// Classifies every key seen in either file by the value each file maps it
/// to. Keys with no value in either file are left out.
#[must_use]
pub fn cross_compare(first: &[Record], second: &[Record], field: KeyField) -> CrossComparison {
    let map1 = first_mapping(first, field);
    let map2 = first_mapping(second, field);
    let conflicts1 = conflicting_keys(first, field);
    let conflicts2 = conflicting_keys(second, field);

    let keys: BTreeSet<&str> = map1.keys().chain(map2.keys()).copied().collect();
    let entries = keys
        .into_iter()
        .filter_map(|key| {
            let v1 = map1.get(key).copied().flatten();
            let v2 = map2.get(key).copied().flatten();
            let status = KeyStatus::classify(v1, v2)?;
            Some(CrossEntry {
                key: key.to_string(),
                first: v1.map(str::to_string),
                second: v2.map(str::to_string),
                status,
                internal_conflict_first: conflicts1.contains(key),
                internal_conflict_second: conflicts2.contains(key),
            })
        })
        .collect();

    CrossComparison { field, entries }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
