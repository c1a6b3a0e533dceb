//! Filter evaluator: selects the rows matching a single filter clause.
//!
//! A [`Filter`] is compiled once into a [`Predicate`] (resolving the target
//! field and pre-splitting `in` lists), then applied to each row. Evaluation
//! is stable: rows are never reordered, duplicated, or modified.
//!
//! # Operator semantics
//!
//! | Operator | Keeps a row when |
//! |----------|------------------|
//! | `any` | the field is present |
//! | `none` | the field is absent |
//! | `equals` | numbers: exactly equal to a numeric value; text: equal ignoring case |
//! | `greater_than` / `less_than` | the field is a number strictly above / below the value |
//! | `in` | the lower-cased field is one of the comma-separated tokens |
//! | `contains` | field and value are both text and the value is a substring, ignoring case |
//! | anything else | always |
//!
//! Type mismatches never error; they simply do not match.

use crate::catalog::property_key;
use crate::error::CatalogError;
use crate::normalizer::parse_number;
use crate::types::{FieldName, Filter, FilterValue, OperatorKind, Product, Scalar};

/// Return the rows of `products` that satisfy `filter`.
///
/// With no filter, or a filter whose value is the empty string, every row is
/// returned unchanged. Fails with [`CatalogError::InvalidPropertyKey`] when
/// the filter's property name is not a known field; no partial result is
/// produced in that case.
pub fn filter_products(
    products: &[Product],
    filter: Option<&Filter>,
) -> Result<Vec<Product>, CatalogError> {
    let Some(filter) = filter.filter(|f| !f.value.as_ref().is_some_and(FilterValue::is_empty_text))
    else {
        return Ok(products.to_vec());
    };

    let field = property_key(&filter.property.name)?;
    let predicate = Predicate::compile(filter.operator.id, filter.value.as_ref());

    let kept: Vec<Product> = products
        .iter()
        .filter(|p| predicate.matches(p.get(field)))
        .cloned()
        .collect();

    tracing::debug!(
        field = %field,
        operator = filter.operator.id.id(),
        kept = kept.len(),
        total = products.len(),
        "filter applied"
    );
    Ok(kept)
}

/// Resolve only the field a filter targets. Useful to validate a clause
/// before running it.
pub fn filter_field(filter: &Filter) -> Result<FieldName, CatalogError> {
    property_key(&filter.property.name)
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// A filter clause with its value pre-processed for the operator.
///
/// Value-bearing operators compiled without a value never match.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    HasValue,
    NoValue,
    Equals(Option<FilterValue>),
    GreaterThan(Option<f64>),
    LessThan(Option<f64>),
    In(Vec<String>),
    Contains(Option<String>),
    /// Unknown operator: every row matches.
    PassThrough,
}

impl Predicate {
    pub fn compile(operator: OperatorKind, value: Option<&FilterValue>) -> Self {
        match operator {
            OperatorKind::HasValue => Predicate::HasValue,
            OperatorKind::NoValue => Predicate::NoValue,
            OperatorKind::Equals => Predicate::Equals(value.cloned()),
            OperatorKind::GreaterThan => Predicate::GreaterThan(value.and_then(numeric_value)),
            OperatorKind::LessThan => Predicate::LessThan(value.and_then(numeric_value)),
            OperatorKind::In => Predicate::In(
                value
                    .map(|v| in_tokens(&v.to_string()))
                    .unwrap_or_default(),
            ),
            OperatorKind::Contains => Predicate::Contains(match value {
                Some(FilterValue::Text(t)) => Some(t.to_lowercase()),
                _ => None,
            }),
            OperatorKind::Unknown => Predicate::PassThrough,
        }
    }

    /// Test one field value (`None` when the row lacks the field).
    pub fn matches(&self, value: Option<&Scalar>) -> bool {
        match self {
            Predicate::HasValue => value.is_some(),
            Predicate::NoValue => value.is_none(),
            Predicate::Equals(expected) => match (value, expected) {
                (Some(actual), Some(expected)) => equals(actual, expected),
                _ => false,
            },
            Predicate::GreaterThan(bound) => match (value.and_then(Scalar::as_number), bound) {
                (Some(n), Some(bound)) => n > *bound,
                _ => false,
            },
            Predicate::LessThan(bound) => match (value.and_then(Scalar::as_number), bound) {
                (Some(n), Some(bound)) => n < *bound,
                _ => false,
            },
            Predicate::In(tokens) => value
                .map(|v| v.to_string().to_lowercase())
                .is_some_and(|v| tokens.contains(&v)),
            Predicate::Contains(needle) => match (value.and_then(Scalar::as_text), needle) {
                (Some(hay), Some(needle)) => hay.to_lowercase().contains(needle.as_str()),
                _ => false,
            },
            Predicate::PassThrough => true,
        }
    }
}

/// Numbers compare exactly against numeric filter values only; text compares
/// case-insensitively against the filter value's text form.
fn equals(actual: &Scalar, expected: &FilterValue) -> bool {
    match (actual, expected) {
        (Scalar::Number(n), FilterValue::Number(m)) => n == m,
        (Scalar::Number(_), _) => false,
        (Scalar::Text(t), expected) => t.to_lowercase() == expected.to_string().to_lowercase(),
    }
}

/// The numeric form of a filter value. Text that is not a number yields
/// `None`, which never matches.
fn numeric_value(value: &FilterValue) -> Option<f64> {
    match value {
        FilterValue::Number(n) => Some(*n),
        other => parse_number(&other.to_string()).filter(|n| !n.is_nan()),
    }
}

/// Split an `in` list on commas and lower-case each token.
///
/// Only a single leading space is stripped from each token: `"a, b"` yields
/// `["a", "b"]`, but `"a,  b"` yields `["a", " b"]` and trailing spaces are
/// kept.
pub fn in_tokens(list: &str) -> Vec<String> {
    list.split(',')
        .map(|token| {
            let lower = token.to_lowercase();
            match lower.strip_prefix(' ') {
                Some(rest) => rest.to_string(),
                None => lower,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Operator, Property, PropertyType};
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<Product> {
        vec![
            Product::new(11)
                .with(FieldName::ProductName, "Wireless Headphones")
                .with(FieldName::Color, "Black")
                .with(FieldName::Weight, 5.2)
                .with(FieldName::Category, "Electronics"),
            Product::new(22)
                .with(FieldName::ProductName, "Bluetooth Speaker")
                .with(FieldName::Weight, 8.5)
                .with(FieldName::Category, "Electronics"),
        ]
    }

    fn clause(name: &str, kind: PropertyType, op: OperatorKind, value: Option<FilterValue>) -> Filter {
        Filter::new(Property::new(0, name, kind), Operator::from(op), value)
    }

    fn ids(rows: &[Product]) -> Vec<i64> {
        rows.iter().map(|p| p.id).collect()
    }

    #[test]
    fn no_filter_is_identity() {
        assert_eq!(filter_products(&rows(), None).unwrap(), rows());
    }

    #[test]
    fn empty_text_value_is_identity_even_for_unknown_property() {
        let f = clause("nonsense", PropertyType::String, OperatorKind::Equals, Some("".into()));
        assert_eq!(filter_products(&rows(), Some(&f)).unwrap(), rows());
    }

    #[test]
    fn unknown_property_aborts() {
        let f = clause("nonsense", PropertyType::String, OperatorKind::Equals, Some("x".into()));
        assert!(matches!(
            filter_products(&rows(), Some(&f)),
            Err(CatalogError::InvalidPropertyKey { .. })
        ));
    }

    #[test]
    fn equals_text_ignores_case() {
        let f = clause(
            "Product Name",
            PropertyType::String,
            OperatorKind::Equals,
            Some("wireless HEADPHONES".into()),
        );
        assert_eq!(ids(&filter_products(&rows(), Some(&f)).unwrap()), vec![11]);
    }

    #[test]
    fn equals_number_is_strict() {
        let exact = clause("weight (oz)", PropertyType::Number, OperatorKind::Equals, Some(FilterValue::Number(8.5)));
        assert_eq!(ids(&filter_products(&rows(), Some(&exact)).unwrap()), vec![22]);

        let text = clause("weight (oz)", PropertyType::Number, OperatorKind::Equals, Some("8.5".into()));
        assert!(filter_products(&rows(), Some(&text)).unwrap().is_empty());
    }

    #[test]
    fn comparisons_coerce_text_bounds() {
        let gt = clause("weight (oz)", PropertyType::Number, OperatorKind::GreaterThan, Some("6".into()));
        assert_eq!(ids(&filter_products(&rows(), Some(&gt)).unwrap()), vec![22]);

        let lt = clause("weight (oz)", PropertyType::Number, OperatorKind::LessThan, Some(FilterValue::Number(6.0)));
        assert_eq!(ids(&filter_products(&rows(), Some(&lt)).unwrap()), vec![11]);
    }

    #[test]
    fn comparisons_never_match_text_fields() {
        let gt = clause("Product Name", PropertyType::String, OperatorKind::GreaterThan, Some(FilterValue::Number(0.0)));
        assert!(filter_products(&rows(), Some(&gt)).unwrap().is_empty());
    }

    #[test]
    fn non_numeric_bound_matches_nothing() {
        let gt = clause("weight (oz)", PropertyType::Number, OperatorKind::GreaterThan, Some("heavy".into()));
        assert!(filter_products(&rows(), Some(&gt)).unwrap().is_empty());
    }

    #[test]
    fn presence_operators_split_rows() {
        let any = clause("color", PropertyType::String, OperatorKind::HasValue, None);
        assert_eq!(ids(&filter_products(&rows(), Some(&any)).unwrap()), vec![11]);
        let none = clause("color", PropertyType::String, OperatorKind::NoValue, None);
        assert_eq!(ids(&filter_products(&rows(), Some(&none)).unwrap()), vec![22]);
    }

    #[test]
    fn contains_requires_text_on_both_sides() {
        let f = clause("Product Name", PropertyType::String, OperatorKind::Contains, Some("speak".into()));
        assert_eq!(ids(&filter_products(&rows(), Some(&f)).unwrap()), vec![22]);

        let numeric = clause("weight (oz)", PropertyType::Number, OperatorKind::Contains, Some("5".into()));
        assert!(filter_products(&rows(), Some(&numeric)).unwrap().is_empty());
    }

    #[test]
    fn in_matches_numbers_by_text_form() {
        let f = clause("weight (oz)", PropertyType::Number, OperatorKind::In, Some("1, 8.5".into()));
        assert_eq!(ids(&filter_products(&rows(), Some(&f)).unwrap()), vec![22]);
    }

    #[test]
    fn in_accepts_list_values() {
        let f = clause(
            "category",
            PropertyType::Enumerated,
            OperatorKind::In,
            Some(FilterValue::List(vec!["Tools".into(), "electronics".into()])),
        );
        assert_eq!(ids(&filter_products(&rows(), Some(&f)).unwrap()), vec![11, 22]);
    }

    #[test]
    fn unknown_operator_passes_everything() {
        let f = clause("color", PropertyType::String, OperatorKind::Unknown, Some("x".into()));
        assert_eq!(filter_products(&rows(), Some(&f)).unwrap(), rows());
    }

    #[test]
    fn value_operators_without_value_match_nothing() {
        for op in [
            OperatorKind::Equals,
            OperatorKind::GreaterThan,
            OperatorKind::LessThan,
            OperatorKind::In,
            OperatorKind::Contains,
        ] {
            let f = clause("weight (oz)", PropertyType::Number, op, None);
            assert!(
                filter_products(&rows(), Some(&f)).unwrap().is_empty(),
                "{op:?} matched without a value"
            );
        }
    }

    #[test]
    fn in_tokens_strip_one_leading_space_only() {
        assert_eq!(in_tokens("Electronics, Mobile"), vec!["electronics", "mobile"]);
        assert_eq!(in_tokens("a,  b"), vec!["a", " b"]);
        assert_eq!(in_tokens("a ,b "), vec!["a ", "b "]);
        assert_eq!(in_tokens("New York"), vec!["new york"]);
    }
}
