use serde::Deserialize;

/// One row of the flattened Spar catalogue export.
///
/// Column names are the dotted paths produced when the nested venue JSON is
/// flattened (`unit_price.unit`, `sell_by_weight_config.grams_per_step`, ...).
/// Every column is optional; missing ones read as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SparRow {
    pub id: String,
    pub name: String,
    pub barcode_gtin: String,
    /// Free-text declared size, e.g. `"500 g"` or `"6 x 0,5 l"`.
    pub unit_info: String,
    #[serde(rename = "disabled_info.disable_text")]
    pub disable_text: String,
    /// Current price in fillér.
    pub price: String,
    /// Pre-discount price in fillér; empty when not discounted.
    pub original_price: String,
    #[serde(rename = "unit_price.unit")]
    pub unit_price_unit: String,
    #[serde(rename = "unit_price.base")]
    pub unit_price_base: String,
    #[serde(rename = "unit_price.price")]
    pub unit_price_price: String,
    #[serde(rename = "unit_price.original_price")]
    pub unit_price_original_price: String,
    pub category_slug: String,
    #[serde(rename = "sell_by_weight_config.input_type")]
    pub sell_by_weight_input_type: String,
    #[serde(rename = "sell_by_weight_config.grams_per_step")]
    pub sell_by_weight_grams_per_step: String,
    #[serde(rename = "sell_by_weight_config.price_per_kg")]
    pub sell_by_weight_price_per_kg: String,
    /// Python-style list literal of image URLs, e.g. `"['https://…', …]"`.
    pub images: String,
}

impl SparRow {
    /// Returns `true` when the product is sold by weight with a fixed step.
    #[must_use]
    pub fn has_sell_by_weight_step(&self) -> bool {
        !self.sell_by_weight_input_type.trim().is_empty()
            && !self.sell_by_weight_grams_per_step.trim().is_empty()
    }
}
