//! Package-size quantities shared by the normalizer and the output records.

/// Unit of a package size.
///
/// After normalization only [`Unit::Gram`], [`Unit::Milliliter`] and
/// [`Unit::Piece`] remain (plus [`Unit::Other`] for tags nothing recognized).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    Gram,
    Milliliter,
    Piece,
    Kilogram,
    Liter,
    Centiliter,
    /// Unrecognized tag, kept verbatim (lower-cased).
    Other(String),
}

impl Unit {
    /// Maps a unit token from a size string, a unit-price block or a
    /// sell-by-weight config to a [`Unit`]. Matching is case-insensitive.
    ///
    /// `number_of_items` maps to grams: the catalogue uses it on weighed
    /// goods whose step is given in grams.
    #[must_use]
    pub fn from_token(token: &str) -> Unit {
        let lower = token.trim().to_lowercase();
        match lower.as_str() {
            "g" | "gram" | "grams" | "number_of_items" => Unit::Gram,
            "kg" | "kilogram" => Unit::Kilogram,
            "ml" => Unit::Milliliter,
            "l" | "litre" | "liter" => Unit::Liter,
            "cl" => Unit::Centiliter,
            "db" | "pc" | "pcs" | "piece" => Unit::Piece,
            _ => Unit::Other(lower),
        }
    }

    /// Token written to output records (`"g"`, `"ml"`, `"db"`, ...).
    #[must_use]
    pub fn as_token(&self) -> &str {
        match self {
            Unit::Gram => "g",
            Unit::Milliliter => "ml",
            Unit::Piece => "db",
            Unit::Kilogram => "kg",
            Unit::Liter => "l",
            Unit::Centiliter => "cl",
            Unit::Other(tag) => tag,
        }
    }

    /// Returns `true` for the three units the normalizer produces.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        matches!(self, Unit::Gram | Unit::Milliliter | Unit::Piece)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

/// A `(value, unit)` package size, e.g. `500 g` or `6 db`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    #[must_use]
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// One pack of the primary size: the default secondary quantity.
    #[must_use]
    pub fn pack() -> Self {
        Self::new(1.0, Unit::Piece)
    }

    /// Returns `true` if both quantities share a unit and can be compared
    /// by value.
    #[must_use]
    pub fn is_commensurable(&self, other: &Quantity) -> bool {
        self.unit == other.unit
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_token_is_case_insensitive() {
        assert_eq!(Unit::from_token("KG"), Unit::Kilogram);
        assert_eq!(Unit::from_token("Ml"), Unit::Milliliter);
        assert_eq!(Unit::from_token(" db "), Unit::Piece);
    }

    #[test]
    fn from_token_piece_aliases() {
        for token in ["db", "pc", "pcs", "piece"] {
            assert_eq!(Unit::from_token(token), Unit::Piece, "token {token}");
        }
    }

    #[test]
    fn from_token_catalogue_unit_types() {
        assert_eq!(Unit::from_token("kilogram"), Unit::Kilogram);
        assert_eq!(Unit::from_token("litre"), Unit::Liter);
        assert_eq!(Unit::from_token("grams"), Unit::Gram);
        assert_eq!(Unit::from_token("number_of_items"), Unit::Gram);
    }

    #[test]
    fn from_token_unknown_is_kept() {
        assert_eq!(Unit::from_token("Csomag"), Unit::Other("csomag".to_string()));
        assert_eq!(Unit::from_token("Csomag").as_token(), "csomag");
    }

    #[test]
    fn canonical_units() {
        assert!(Unit::Gram.is_canonical());
        assert!(Unit::Piece.is_canonical());
        assert!(!Unit::Liter.is_canonical());
        assert!(!Unit::Other("x".to_string()).is_canonical());
    }

    #[test]
    fn display_uses_output_tokens() {
        assert_eq!(Quantity::new(500.0, Unit::Gram).to_string(), "500 g");
        assert_eq!(Quantity::pack().to_string(), "1 db");
        assert_eq!(Quantity::new(1.5, Unit::Liter).to_string(), "1.5 l");
    }

    #[test]
    fn commensurable_requires_same_unit() {
        let a = Quantity::new(1.0, Unit::Gram);
        assert!(a.is_commensurable(&Quantity::new(5.0, Unit::Gram)));
        assert!(!a.is_commensurable(&Quantity::new(5.0, Unit::Milliliter)));
    }
}
