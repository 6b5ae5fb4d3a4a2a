use super::*;

fn q(value: f64, unit: Unit) -> Option<Quantity> {
    Some(Quantity::new(value, unit))
}

// -----------------------------------------------------------------------
// plain matches
// -----------------------------------------------------------------------

#[test]
fn size_grams_with_space() {
    assert_eq!(parse_size("Pöttyös Túró Rudi 30 g"), q(30.0, Unit::Gram));
}

#[test]
fn size_grams_no_space() {
    assert_eq!(parse_size("Milka 100g"), q(100.0, Unit::Gram));
}

#[test]
fn size_decimal_comma() {
    assert_eq!(parse_size("Szentkirályi ásványvíz 1,5 l"), q(1.5, Unit::Liter));
}

#[test]
fn size_decimal_dot() {
    assert_eq!(parse_size("Coca-Cola 0.5 l"), q(0.5, Unit::Liter));
}

#[test]
fn size_kilogram_not_read_as_gram() {
    assert_eq!(parse_size("Liszt 2 kg"), q(2.0, Unit::Kilogram));
}

#[test]
fn size_milliliter_not_read_as_liter() {
    assert_eq!(parse_size("Tejszín 200 ml"), q(200.0, Unit::Milliliter));
}

#[test]
fn size_centiliter() {
    assert_eq!(parse_size("Unicum 35 cl"), q(35.0, Unit::Centiliter));
}

#[test]
fn size_pcs_maps_to_piece() {
    assert_eq!(parse_size("Tojás 10 pcs"), q(10.0, Unit::Piece));
    assert_eq!(parse_size("Tojás 6 pc"), q(6.0, Unit::Piece));
    assert_eq!(parse_size("Zsemle 4 db"), q(4.0, Unit::Piece));
}

#[test]
fn size_last_plain_match_wins() {
    // Known limitation: the rightmost mention is taken even when the first
    // one is the pack size.
    assert_eq!(
        parse_size("Kenyér 1 kg, tartalmaz 2 db zacskót"),
        q(2.0, Unit::Piece)
    );
}

// -----------------------------------------------------------------------
// multiplicative packs
// -----------------------------------------------------------------------

#[test]
fn size_multiplicative_pack() {
    assert_eq!(parse_size("4 x 100 g sajt"), q(400.0, Unit::Gram));
}

#[test]
fn size_multiplicative_no_spaces() {
    assert_eq!(parse_size("Joghurt 4x125g"), q(500.0, Unit::Gram));
}

#[test]
fn size_multiplicative_decimal_amount() {
    assert_eq!(parse_size("Sör 6 x 0,5 l"), q(3.0, Unit::Liter));
}

#[test]
fn size_multiplicative_uppercase_separator() {
    assert_eq!(parse_size("Sör 6 X 0,5 l"), q(3.0, Unit::Liter));
    assert_eq!(parse_size("Joghurt 4X125g"), q(500.0, Unit::Gram));
}

#[test]
fn size_uppercase_separator_keeps_units_case_sensitive() {
    assert_eq!(parse_size("Sör 6 X 0,5 L"), None);
}

#[test]
fn size_multiplicative_preferred_over_later_plain_match() {
    assert_eq!(
        parse_size("Müzliszelet 6 x 25 g, 200 g"),
        q(150.0, Unit::Gram)
    );
}

#[test]
fn size_rightmost_multiplicative_wins() {
    assert_eq!(parse_size("2 x 50 g és 3 x 10 g"), q(30.0, Unit::Gram));
}

// -----------------------------------------------------------------------
// fallback and absence
// -----------------------------------------------------------------------

#[test]
fn size_trailing_db_word() {
    assert_eq!(parse_size("Friss kenyér db"), q(1.0, Unit::Piece));
}

#[test]
fn size_trailing_upper_case_kg_word() {
    // Pattern tokens are lower case, so "2 KG" is no match and only the
    // trailing-word fallback applies.
    assert_eq!(parse_size("Tej 2 KG"), q(1.0, Unit::Kilogram));
}

#[test]
fn size_fallback_ignores_trailing_whitespace() {
    assert_eq!(parse_size("Banán kg  "), q(1.0, Unit::Kilogram));
}

#[test]
fn size_not_present_returns_none() {
    assert!(parse_size("Friss zöldség").is_none());
}

#[test]
fn size_empty_returns_none() {
    assert!(parse_size("").is_none());
    assert!(parse_size("   ").is_none());
}

#[test]
fn size_non_ascii_text_no_panic() {
    assert_eq!(parse_size("Őszibarack befőtt – 820 g"), q(820.0, Unit::Gram));
}
