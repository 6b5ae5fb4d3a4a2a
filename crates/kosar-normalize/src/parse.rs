//! Extraction of a package size from free text: the catalogue's `unit_info`
//! field or the product title.
//!
//! Sizes are found with a single regex pass. See [`crate::reconcile`] for how
//! the two candidates per product are merged.

use std::sync::LazyLock;

use kosar_core::{Quantity, Unit};
use regex::Regex;

use crate::units::parse_decimal;

/// A number (decimal comma or dot) followed by a unit token, or by a
/// multiplicative `x <number> <unit>` tail as in `"4 x 100 g"`.
///
/// Unit tokens are lower case only; the `x` separator takes either case.
///
/// Alternation order matters: `kg` before `g`, `ml`/`cl` before `l`,
/// `pcs` before `pc`.
static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d+(?:[.,]\d+)?)\s*(kg|g|ml|l|db|pcs|pc|cl|[xX]\s*(\d+(?:[.,]\d+)?)\s*(kg|g|db|ml|cl|l))",
    )
    .expect("valid size regex")
});

/// One regex hit, before any decision about which hit wins.
#[derive(Debug)]
struct SizeMatch<'a> {
    number: &'a str,
    unit: &'a str,
    /// `(per_unit_amount, inner_unit)` for the `N x M unit` form.
    multiplier: Option<(&'a str, &'a str)>,
}

/// Attempts to parse a package size from `text`.
///
/// Rules:
/// 1. Every `<number> <unit>` and `<count> x <amount> <unit>` occurrence is
///    collected. Unit tokens are matched as written (lower case); the
///    separator may be `x` or `X`.
/// 2. If any occurrence is multiplicative, the rightmost one wins and its
///    value is `count * amount` in the inner unit.
/// 3. Otherwise the rightmost plain occurrence wins; `pc`/`pcs` become
///    pieces.
/// 4. With no occurrence at all, a trailing bare `db` or `kg` word
///    (any case) yields `1 db` / `1 kg`.
///
/// The returned quantity is not normalized; `kg`, `l` and `cl` are kept.
/// Occurrences whose number fails to parse are skipped.
#[must_use]
pub fn parse_size(text: &str) -> Option<Quantity> {
    let matches: Vec<SizeMatch<'_>> = SIZE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let number = caps.get(1)?.as_str();
            let unit = caps.get(2)?.as_str();
            let multiplier = caps
                .get(3)
                .zip(caps.get(4))
                .map(|(amount, inner)| (amount.as_str(), inner.as_str()));
            Some(SizeMatch {
                number,
                unit,
                multiplier,
            })
        })
        .collect();

    if matches.is_empty() {
        return parse_trailing_unit_word(text);
    }

    let multiplied = matches.iter().rev().find_map(|m| {
        let (amount, inner) = m.multiplier?;
        let count = parse_decimal(m.number)?;
        let amount = parse_decimal(amount)?;
        Some(Quantity::new(count * amount, Unit::from_token(inner)))
    });
    if multiplied.is_some() {
        return multiplied;
    }

    matches
        .iter()
        .rev()
        .filter(|m| m.multiplier.is_none())
        .find_map(|m| Some(Quantity::new(parse_decimal(m.number)?, Unit::from_token(m.unit))))
}

/// Fallback for titles such as `"Friss kenyér db"` that name a unit without
/// a number.
fn parse_trailing_unit_word(text: &str) -> Option<Quantity> {
    let last = text.split_whitespace().next_back()?.to_lowercase();
    match last.as_str() {
        "db" => Some(Quantity::new(1.0, Unit::Piece)),
        "kg" => Some(Quantity::new(1.0, Unit::Kilogram)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
