//! Reconciliation of the two size candidates of a product.
//!
//! The catalogue declares a size (`unit_info`) and the product title usually
//! repeats it. When the two disagree, the decision tree in [`reconcile`]
//! picks the authoritative primary size and a secondary pack count. Both
//! inputs must already be normalized.

use kosar_core::{Quantity, Unit};

use crate::overrides::{OverrideTable, OverrideTables};

/// Relative band within which two same-unit sizes count as equal.
pub const TOLERANCE: f64 = 1.05;

/// Which branch of the decision tree produced a [`Reconciliation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Both candidates are equal, or only the name-derived one exists.
    Agreed,
    /// Only the declared size exists.
    DeclaredOnly,
    /// Neither candidate exists.
    BothEmpty,
    /// Same unit, declared size more than 5% larger than the title's.
    DeclaredLarger,
    /// Same unit, title size more than 5% larger than the declared one.
    NameLarger,
    /// Same unit, within the 5% band.
    Negligible,
    /// One side counts pieces; it becomes the secondary quantity.
    PiecePack,
    /// Two different non-piece units (mass against volume).
    UnitConflict,
}

impl Outcome {
    /// Every outcome, in decision-tree order.
    pub const ALL: [Outcome; 8] = [
        Outcome::Agreed,
        Outcome::DeclaredOnly,
        Outcome::BothEmpty,
        Outcome::DeclaredLarger,
        Outcome::NameLarger,
        Outcome::Negligible,
        Outcome::PiecePack,
        Outcome::UnitConflict,
    ];

    /// Short label used in logs and summaries.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Agreed => "agreed",
            Outcome::DeclaredOnly => "declared_only",
            Outcome::BothEmpty => "both_empty",
            Outcome::DeclaredLarger => "declared_larger",
            Outcome::NameLarger => "name_larger",
            Outcome::Negligible => "negligible",
            Outcome::PiecePack => "piece_pack",
            Outcome::UnitConflict => "unit_conflict",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The authoritative sizes of one product.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub primary: Option<Quantity>,
    pub secondary: Option<Quantity>,
    pub outcome: Outcome,
    /// An override table entry changed the result.
    pub override_applied: bool,
    /// The sell-by-weight step replaced the primary size.
    pub custom_applied: bool,
}

impl Reconciliation {
    fn new(primary: Option<Quantity>, secondary: Option<Quantity>, outcome: Outcome) -> Self {
        Self {
            primary,
            secondary,
            outcome,
            override_applied: false,
            custom_applied: false,
        }
    }
}

/// Merges the declared and name-derived sizes of `product_name`.
///
/// Evaluated in order:
/// 1. Declared absent or equal to the name-derived size: the name-derived
///    size is primary, no secondary.
/// 2. Same unit: a difference beyond [`TOLERANCE`] means the larger side is
///    a multi-pack total, so the smaller side becomes primary with one pack
///    as secondary, unless the product is listed in the matching override
///    table, which keeps the larger side and supplies the secondary.
///    Inside the band the name-derived size wins.
/// 3. Different units: a piece count on either side becomes the secondary.
///    Otherwise the `units_differ` table decides, with milliliters on the
///    declared side flipping the preference.
/// 4. A sell-by-weight step (`custom`) replaces the primary size whatever
///    happened above.
#[must_use]
pub fn reconcile(
    declared: Option<&Quantity>,
    from_name: Option<&Quantity>,
    product_name: &str,
    overrides: &OverrideTables,
    custom: Option<&Quantity>,
) -> Reconciliation {
    let mut result = match (declared, from_name) {
        (None, None) => Reconciliation::new(None, None, Outcome::BothEmpty),
        (None, Some(name)) => Reconciliation::new(Some(name.clone()), None, Outcome::Agreed),
        (Some(d), Some(n)) if d == n => {
            Reconciliation::new(Some(n.clone()), None, Outcome::Agreed)
        }
        (Some(d), None) => Reconciliation::new(Some(d.clone()), None, Outcome::DeclaredOnly),
        (Some(d), Some(n)) if d.is_commensurable(n) => {
            reconcile_same_unit(d, n, product_name, overrides)
        }
        (Some(d), Some(n)) => reconcile_unit_mismatch(d, n, product_name, &overrides.units_differ),
    };

    if let Some(custom) = custom {
        result.primary = Some(custom.clone());
        result.custom_applied = true;
    }

    result
}

fn reconcile_same_unit(
    declared: &Quantity,
    from_name: &Quantity,
    product_name: &str,
    overrides: &OverrideTables,
) -> Reconciliation {
    if declared.value > from_name.value * TOLERANCE {
        pick_with_override(
            from_name,
            declared,
            product_name,
            &overrides.declared_larger,
            Outcome::DeclaredLarger,
        )
    } else if from_name.value > declared.value * TOLERANCE {
        pick_with_override(
            declared,
            from_name,
            product_name,
            &overrides.name_larger,
            Outcome::NameLarger,
        )
    } else {
        Reconciliation::new(
            Some(from_name.clone()),
            Some(Quantity::pack()),
            Outcome::Negligible,
        )
    }
}

/// The smaller side wins with one pack as secondary, unless `table` lists
/// the product: then the larger side wins and the table supplies the
/// secondary (one pack when its value line is unusable).
fn pick_with_override(
    smaller: &Quantity,
    larger: &Quantity,
    product_name: &str,
    table: &OverrideTable,
    outcome: Outcome,
) -> Reconciliation {
    if table.contains(product_name) {
        let secondary = table
            .corrected_size(product_name)
            .unwrap_or_else(Quantity::pack);
        let mut result = Reconciliation::new(Some(larger.clone()), Some(secondary), outcome);
        result.override_applied = true;
        result
    } else {
        Reconciliation::new(Some(smaller.clone()), Some(Quantity::pack()), outcome)
    }
}

fn reconcile_unit_mismatch(
    declared: &Quantity,
    from_name: &Quantity,
    product_name: &str,
    units_differ: &OverrideTable,
) -> Reconciliation {
    if declared.unit == Unit::Piece {
        return Reconciliation::new(
            Some(from_name.clone()),
            Some(declared.clone()),
            Outcome::PiecePack,
        );
    }
    if from_name.unit == Unit::Piece {
        return Reconciliation::new(
            Some(declared.clone()),
            Some(from_name.clone()),
            Outcome::PiecePack,
        );
    }

    // Observed curation rule: listing a product inverts the default
    // milliliter preference.
    let listed = units_differ.contains(product_name);
    let declared_is_ml = declared.unit == Unit::Milliliter;
    let prefer_name = if listed { declared_is_ml } else { !declared_is_ml };
    let primary = if prefer_name { from_name } else { declared };

    let mut result = Reconciliation::new(
        Some(primary.clone()),
        Some(Quantity::pack()),
        Outcome::UnitConflict,
    );
    result.override_applied = listed;
    result
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
