use serde::{Deserialize, Serialize};

use crate::quantity::Quantity;

/// Output column order of a normalized product file.
pub const OUTPUT_COLUMNS: [&str; 18] = [
    "store_name",
    "store_product_id",
    "product_name",
    "brand_name",
    "available",
    "expected_restock",
    "barcode",
    "unit_price",
    "unit_type",
    "unit_step",
    "is_discounted",
    "original_unit_price",
    "secondary_unit_price",
    "secondary_unit_type",
    "secondary_unit_step",
    "image_urls",
    "description",
    "categories",
];

/// A store product normalized into the common cross-store record.
///
/// Field order matches [`OUTPUT_COLUMNS`]; the `csv` writer derives the
/// header from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    pub store_name: String,
    /// Store-side product identifier, kept as a string.
    pub store_product_id: String,
    pub product_name: String,
    pub brand_name: Option<String>,
    pub available: bool,
    pub expected_restock: Option<String>,
    /// GTIN, present only when the source value is all digits.
    pub barcode: Option<String>,
    /// Shelf price in forints.
    pub unit_price: Option<f64>,
    /// Canonical unit of the primary size (`"g"`, `"ml"` or `"db"`).
    pub unit_type: Option<String>,
    /// Value of the primary size in `unit_type` units.
    pub unit_step: Option<f64>,
    pub is_discounted: bool,
    /// Pre-discount price in forints, when discounted.
    pub original_unit_price: Option<f64>,
    pub secondary_unit_price: Option<f64>,
    /// Unit of the secondary (pack count) quantity, usually `"db"`.
    pub secondary_unit_type: Option<String>,
    pub secondary_unit_step: Option<f64>,
    /// Up to two image URLs joined with `;`.
    pub image_urls: Option<String>,
    pub description: Option<String>,
    /// Store category slug.
    pub categories: Option<String>,
}

impl NormalizedProduct {
    /// Primary package size, if resolved.
    #[must_use]
    pub fn primary_size(&self) -> Option<Quantity> {
        join_size(self.unit_step, self.unit_type.as_deref())
    }

    /// Secondary package size, if resolved.
    #[must_use]
    pub fn secondary_size(&self) -> Option<Quantity> {
        join_size(self.secondary_unit_step, self.secondary_unit_type.as_deref())
    }

    /// Writes a resolved primary size into `unit_step` / `unit_type`.
    pub fn set_primary_size(&mut self, size: Option<&Quantity>) {
        (self.unit_step, self.unit_type) = split_size(size);
    }

    /// Writes a resolved secondary size into the `secondary_unit_*` fields.
    pub fn set_secondary_size(&mut self, size: Option<&Quantity>) {
        (self.secondary_unit_step, self.secondary_unit_type) = split_size(size);
    }
}

fn join_size(step: Option<f64>, unit: Option<&str>) -> Option<Quantity> {
    match (step, unit) {
        (Some(value), Some(unit)) => Some(Quantity::new(
            value,
            crate::quantity::Unit::from_token(unit),
        )),
        _ => None,
    }
}

fn split_size(size: Option<&Quantity>) -> (Option<f64>, Option<String>) {
    size.map_or((None, None), |q| {
        (Some(q.value), Some(q.unit.as_token().to_string()))
    })
}
