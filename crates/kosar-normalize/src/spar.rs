//! Normalization of one Spar catalogue row into a [`NormalizedProduct`].
//!
//! Size parsing and reconciliation are delegated to [`crate::parse`],
//! [`crate::resolve`] and [`crate::reconcile`]; this module deals with the
//! row's column layout, prices and pass-through fields.

use kosar_core::{NormalizedProduct, Quantity, Unit};

use crate::overrides::OverrideTables;
use crate::parse::parse_size;
use crate::reconcile::{reconcile, Reconciliation};
use crate::resolve::resolve_from_unit_price;
use crate::types::SparRow;
use crate::units::{normalize, parse_decimal, round_to};

/// Normalized size candidates of one row, before reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeCandidates {
    /// Parsed from `unit_info`.
    pub declared: Option<Quantity>,
    /// Parsed from the title, completed from the unit-price blocks.
    pub from_name: Option<Quantity>,
    /// Fixed sell-by-weight step, when configured.
    pub custom: Option<Quantity>,
    /// No source named a size and the name-derived candidate is the
    /// one-piece default.
    pub fail_safe_used: bool,
}

/// Result of normalizing one row.
#[derive(Debug, Clone)]
pub struct SparNormalized {
    pub product: NormalizedProduct,
    pub candidates: SizeCandidates,
    pub reconciliation: Reconciliation,
}

/// Derives the three size candidates of `row`.
#[must_use]
pub fn size_candidates(row: &SparRow) -> SizeCandidates {
    let declared = parse_size(row.unit_info.trim()).map(normalize);

    let mut from_name = parse_size(row.name.trim());
    if declared.is_none() {
        from_name = resolve_from_unit_price(
            from_name,
            &row.unit_price_unit,
            &row.unit_price_base,
            false,
        );
    }
    let from_name = resolve_from_unit_price(
        from_name,
        &row.sell_by_weight_input_type,
        &row.sell_by_weight_grams_per_step,
        false,
    );
    let fail_safe_used = from_name.is_none();
    let from_name = resolve_from_unit_price(
        from_name,
        &row.sell_by_weight_input_type,
        &row.sell_by_weight_grams_per_step,
        true,
    )
    .map(|q| normalize(Quantity::new(round_to(q.value, 3), q.unit)));

    SizeCandidates {
        declared,
        from_name,
        custom: custom_step(row),
        fail_safe_used,
    }
}

fn custom_step(row: &SparRow) -> Option<Quantity> {
    if !row.has_sell_by_weight_step() {
        return None;
    }
    let step = parse_decimal(&row.sell_by_weight_grams_per_step)?;
    Some(normalize(Quantity::new(
        step,
        Unit::from_token(&row.sell_by_weight_input_type),
    )))
}

/// Normalizes `row` into the cross-store product record.
#[must_use]
pub fn normalize_spar_row(
    row: &SparRow,
    overrides: &OverrideTables,
    store_name: &str,
) -> SparNormalized {
    let product_name = row.name.trim().to_string();
    let candidates = size_candidates(row);
    let reconciliation = reconcile(
        candidates.declared.as_ref(),
        candidates.from_name.as_ref(),
        &product_name,
        overrides,
        candidates.custom.as_ref(),
    );
    let prices = derive_prices(row);
    let is_discounted = !row.original_price.trim().is_empty();
    let category = row.category_slug.trim();

    let mut product = NormalizedProduct {
        store_name: store_name.to_string(),
        store_product_id: row.id.trim().to_string(),
        product_name,
        brand_name: None,
        available: !row.disable_text.trim().eq_ignore_ascii_case("sold out"),
        expected_restock: None,
        barcode: parse_barcode(&row.barcode_gtin),
        unit_price: prices.unit_price,
        unit_type: None,
        unit_step: None,
        is_discounted,
        original_unit_price: prices.original_unit_price,
        secondary_unit_price: None,
        secondary_unit_type: None,
        secondary_unit_step: None,
        image_urls: extract_image_urls(&row.images),
        description: None,
        categories: (!category.is_empty()).then(|| category.to_string()),
    };
    product.set_primary_size(reconciliation.primary.as_ref());
    product.set_secondary_size(reconciliation.secondary.as_ref());

    SparNormalized {
        product,
        candidates,
        reconciliation,
    }
}

/// Shelf and pre-discount price in forints.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Prices {
    pub unit_price: Option<f64>,
    pub original_unit_price: Option<f64>,
}

/// Picks the price source of `row`.
///
/// Source prices are in fillér. First match wins: a declared size means a
/// packaged product priced per pack; a sell-by-weight config prices one
/// step from the per-kilogram price; a bare unit-price block is used only
/// for kilogram pricing; anything else falls back to the pack price.
#[must_use]
pub fn derive_prices(row: &SparRow) -> Prices {
    let discounted = !row.original_price.trim().is_empty();

    if !row.unit_info.trim().is_empty() {
        return pack_prices(row, discounted);
    }

    if !row.sell_by_weight_price_per_kg.trim().is_empty() {
        let step = parse_decimal(&row.sell_by_weight_grams_per_step);
        let per_step = |raw: &str| -> Option<f64> {
            let per_kg = parse_decimal(raw)?.trunc();
            Some(per_kg * step? / 1000.0 / 100.0)
        };
        return Prices {
            unit_price: per_step(&row.sell_by_weight_price_per_kg),
            original_unit_price: if discounted {
                per_step(&row.unit_price_original_price)
            } else {
                None
            },
        };
    }

    if !row.unit_price_price.trim().is_empty() {
        let per_kg = row
            .unit_price_unit
            .trim()
            .eq_ignore_ascii_case("kilogram")
            .then(|| {
                let price = parse_decimal(&row.unit_price_price)?;
                let base = parse_decimal(&row.unit_price_base).filter(|b| *b > 0.0)?;
                Some(price / 100.0 / base)
            })
            .flatten();
        return Prices {
            unit_price: per_kg,
            original_unit_price: None,
        };
    }

    pack_prices(row, discounted)
}

fn pack_prices(row: &SparRow, discounted: bool) -> Prices {
    Prices {
        unit_price: filler_to_forint(&row.price),
        original_unit_price: if discounted {
            filler_to_forint(&row.original_price)
        } else {
            None
        },
    }
}

fn filler_to_forint(raw: &str) -> Option<f64> {
    parse_decimal(raw).map(|v| v.trunc() / 100.0)
}

/// Returns the GTIN when the raw value is all ASCII digits, leading zeros
/// included.
fn parse_barcode(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())).then(|| raw.to_string())
}

/// Pulls up to two `https` URLs out of the flattened image list and joins
/// them with `;`.
#[must_use]
pub fn extract_image_urls(raw: &str) -> Option<String> {
    let urls: Vec<&str> = raw
        .split('\'')
        .filter(|piece| piece.starts_with("https"))
        .take(2)
        .collect();
    (!urls.is_empty()).then(|| urls.join(";"))
}

#[cfg(test)]
#[path = "spar_test.rs"]
mod tests;
