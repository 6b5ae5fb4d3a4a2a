//! Unit normalization: every size is reduced to grams, milliliters or pieces
//! so two sizes of the same product can be compared.

use kosar_core::{Quantity, Unit};

/// Converts `quantity` to its canonical unit.
///
/// `l` and `kg` are scaled by 1000, `cl` by 10. Canonical units and
/// unrecognized tags pass through unchanged.
#[must_use]
pub fn normalize(quantity: Quantity) -> Quantity {
    let Quantity { value, unit } = quantity;
    match unit {
        Unit::Liter => Quantity::new(value * 1000.0, Unit::Milliliter),
        Unit::Kilogram => Quantity::new(value * 1000.0, Unit::Gram),
        Unit::Centiliter => Quantity::new(value * 10.0, Unit::Milliliter),
        unit => Quantity::new(value, unit),
    }
}

/// Parses a non-negative decimal that may use a decimal comma, e.g. `"1,5"`.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    let value = raw.trim().replace(',', ".").parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Rounds to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
