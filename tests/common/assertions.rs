//! Domain-specific assertion macros for pfind harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* rows or fields diverged.

// ---------------------------------------------------------------------------
// Row identity assertions
// ---------------------------------------------------------------------------

/// Assert that a slice of products has exactly the given ids, in order.
///
/// ```rust
/// assert_ids!(filtered, [11, 22]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($rows:expr, [$($id:expr),* $(,)?]) => {{
        let actual: Vec<i64> = $rows.iter().map(|p: &pfind_core::Product| p.id).collect();
        let expected: Vec<i64> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "row ids differ");
    }};
}

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert that a product has `field` set to the given scalar.
///
/// ```rust
/// assert_field!(row, FieldName::Weight, 8.5);
/// assert_field!(row, FieldName::Color, "blue");
/// ```
#[macro_export]
macro_rules! assert_field {
    ($product:expr, $field:expr, $value:expr) => {{
        let product: &pfind_core::Product = &$product;
        let field: pfind_core::FieldName = $field;
        let expected = pfind_core::Scalar::from($value);
        match product.get(field) {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_field! failed on product {}:\n  field:    {}\n  expected: {:?}\n  actual:   {:?}",
                product.id, field, expected, actual
            ),
            None => panic!(
                "assert_field! failed on product {}: field {} is absent (expected {:?})",
                product.id, field, expected
            ),
        }
    }};
}

/// Assert that a product does not have `field` set.
#[macro_export]
macro_rules! assert_no_field {
    ($product:expr, $field:expr) => {{
        let product: &pfind_core::Product = &$product;
        let field: pfind_core::FieldName = $field;
        if let Some(actual) = product.get(field) {
            panic!(
                "assert_no_field! failed on product {}: field {} is {:?}",
                product.id, field, actual
            );
        }
    }};
}
