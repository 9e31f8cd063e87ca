// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use conceptscan::normalize::{Amount, category_key, parse_amount};
use rust_decimal::Decimal;

fn value(s: &str) -> Decimal {
    match parse_amount(s) {
        Amount::Value(d) => d,
        other => panic!("expected a value for {:?}, got {:?}", s, other),
    }
}

#[test]
fn comma_decimal_marker() {
    assert_eq!(value("100,50"), Decimal::new(10050, 2));
    assert_eq!(value("50,00"), Decimal::new(5000, 2));
}

#[test]
fn last_separator_is_decimal_marker() {
    assert_eq!(value("1.234,56"), Decimal::new(123456, 2));
    assert_eq!(value("1,234.56"), Decimal::new(123456, 2));
    assert_eq!(value("1.234.567,89"), Decimal::new(123456789, 2));
}

#[test]
fn repeated_single_separator_groups_thousands() {
    assert_eq!(value("1.234.567"), Decimal::from(1234567));
    assert_eq!(value("1,234,567"), Decimal::from(1234567));
}

#[test]
fn currency_symbols_and_whitespace_are_stripped() {
    assert_eq!(value("$ 1.234,56"), Decimal::new(123456, 2));
    assert_eq!(value("  ARS 10,5 "), Decimal::new(105, 1));
    assert_eq!(value("U$S 20"), Decimal::from(20));
    assert_eq!(value("99,90 EUR"), Decimal::new(9990, 2));
    assert_eq!(value("1 234,00"), Decimal::new(123400, 2));
}

#[test]
fn currency_code_glued_to_the_number_is_stripped() {
    assert_eq!(value("100ARS"), Decimal::from(100));
    assert_eq!(value("ARS100,50"), Decimal::new(10050, 2));
    assert_eq!(value("-1.234,56EUR"), Decimal::new(-123456, 2));
    assert_eq!(parse_amount("100ARSX"), Amount::Invalid);
}

#[test]
fn negative_forms() {
    assert_eq!(value("-12,00"), Decimal::new(-1200, 2));
    assert_eq!(value("(12,00)"), Decimal::new(-1200, 2));
    assert_eq!(value("$-12"), Decimal::from(-12));
    assert_eq!(value("12,00-"), Decimal::new(-1200, 2));
}

#[test]
fn bare_fraction_and_trailing_separator() {
    assert_eq!(value(",5"), Decimal::new(5, 1));
    assert_eq!(value("7."), Decimal::from(7));
}

#[test]
fn text_is_invalid_not_zero() {
    assert_eq!(parse_amount("N/A"), Amount::Invalid);
    assert_eq!(parse_amount("12abc34"), Amount::Invalid);
    assert_eq!(parse_amount("USD"), Amount::Invalid);
    assert_eq!(parse_amount(","), Amount::Invalid);
}

#[test]
fn blank_is_empty() {
    assert_eq!(parse_amount(""), Amount::Empty);
    assert_eq!(parse_amount("   "), Amount::Empty);
}

#[test]
fn category_key_trims_and_folds_case() {
    assert_eq!(
        category_key("  Com. MANTENIMIENTO Cuenta \t"),
        "com. mantenimiento cuenta"
    );
    assert_eq!(category_key("Débito"), "débito");
}
