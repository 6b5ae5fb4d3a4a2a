//! Fallback sizing from the catalogue's unit-price blocks, for products
//! whose text fields name no size at all.

use kosar_core::{Quantity, Unit};

use crate::units::parse_decimal;

/// Fills an absent size candidate from a declared unit type and step.
///
/// `candidate` is returned untouched when it is already present. Otherwise
/// the unit-type token (`kilogram`, `litre`, `piece`, `gram`, `grams`,
/// `number_of_items`) and the numeric `step_size` form the size. When the
/// token is unknown or the step does not parse, `fail_safe` selects between
/// one piece and leaving the candidate absent.
#[must_use]
pub fn resolve_from_unit_price(
    candidate: Option<Quantity>,
    declared_unit_type: &str,
    step_size: &str,
    fail_safe: bool,
) -> Option<Quantity> {
    if candidate.is_some() {
        return candidate;
    }

    let unit = match declared_unit_type.trim().to_lowercase().as_str() {
        "kilogram" => Some(Unit::Kilogram),
        "litre" => Some(Unit::Liter),
        "piece" => Some(Unit::Piece),
        "gram" | "grams" | "number_of_items" => Some(Unit::Gram),
        _ => None,
    };

    match (unit, parse_decimal(step_size)) {
        (Some(unit), Some(step)) => Some(Quantity::new(step, unit)),
        _ if fail_safe => Some(Quantity::pack()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_candidate_is_kept() {
        let candidate = Some(Quantity::new(250.0, Unit::Gram));
        assert_eq!(
            resolve_from_unit_price(candidate.clone(), "kilogram", "1", true),
            candidate
        );
    }

    #[test]
    fn kilogram_step() {
        assert_eq!(
            resolve_from_unit_price(None, "kilogram", "1", false),
            Some(Quantity::new(1.0, Unit::Kilogram))
        );
    }

    #[test]
    fn litre_step() {
        assert_eq!(
            resolve_from_unit_price(None, "litre", "0,75", false),
            Some(Quantity::new(0.75, Unit::Liter))
        );
    }

    #[test]
    fn piece_step() {
        assert_eq!(
            resolve_from_unit_price(None, "piece", "1", false),
            Some(Quantity::new(1.0, Unit::Piece))
        );
    }

    #[test]
    fn number_of_items_counts_as_grams() {
        assert_eq!(
            resolve_from_unit_price(None, "number_of_items", "100", false),
            Some(Quantity::new(100.0, Unit::Gram))
        );
    }

    #[test]
    fn sell_by_weight_grams_step() {
        assert_eq!(
            resolve_from_unit_price(None, "Grams", "150", true),
            Some(Quantity::new(150.0, Unit::Gram))
        );
    }

    #[test]
    fn unknown_unit_without_fail_safe_stays_absent() {
        assert_eq!(resolve_from_unit_price(None, "", "", false), None);
        assert_eq!(resolve_from_unit_price(None, "bundle", "2", false), None);
    }

    #[test]
    fn unknown_unit_with_fail_safe_is_one_piece() {
        assert_eq!(
            resolve_from_unit_price(None, "", "", true),
            Some(Quantity::pack())
        );
    }

    #[test]
    fn known_unit_with_unparseable_step_follows_fail_safe() {
        assert_eq!(resolve_from_unit_price(None, "kilogram", "", false), None);
        assert_eq!(
            resolve_from_unit_price(None, "kilogram", "n/a", true),
            Some(Quantity::pack())
        );
    }
}
