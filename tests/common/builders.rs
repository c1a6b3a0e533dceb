#![allow(dead_code)]
//! Test builders: ergonomic constructors for filters and datastores.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use pfind_core::{
    Datastore, Filter, FilterValue, Operator, OperatorKind, Product, Property, RawProduct,
};

use super::fixtures::{scenario_products, scenario_properties};

// ---------------------------------------------------------------------------
// ClauseBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a single [`Filter`] clause.
///
/// # Example
///
/// ```rust
/// let filter = ClauseBuilder::on(property(WEIGHT))
///     .op(OperatorKind::GreaterThan)
///     .number(6.0)
///     .build();
/// ```
pub struct ClauseBuilder {
    property: Property,
    operator: Operator,
    value: Option<FilterValue>,
}

impl ClauseBuilder {
    pub fn on(property: Property) -> Self {
        Self {
            property,
            operator: Operator::from(OperatorKind::Equals),
            value: None,
        }
    }

    pub fn op(mut self, kind: OperatorKind) -> Self {
        self.operator = Operator::from(kind);
        self
    }

    pub fn text(mut self, value: &str) -> Self {
        self.value = Some(FilterValue::Text(value.to_string()));
        self
    }

    pub fn number(mut self, value: f64) -> Self {
        self.value = Some(FilterValue::Number(value));
        self
    }

    pub fn list(mut self, values: &[&str]) -> Self {
        self.value = Some(FilterValue::List(values.iter().map(|v| v.to_string()).collect()));
        self
    }

    pub fn build(self) -> Filter {
        Filter::new(self.property, self.operator, self.value)
    }
}

// ---------------------------------------------------------------------------
// Datastores and rows
// ---------------------------------------------------------------------------

/// A datastore over the scenario catalog and products.
pub fn scenario_store() -> Datastore {
    Datastore::new(
        scenario_properties(),
        pfind_core::catalog::default_operators(),
        scenario_products(),
    )
}

/// Normalise `products` against the scenario catalog.
pub fn rows(products: &[RawProduct]) -> Vec<Product> {
    pfind_core::normalize_products(products, &scenario_properties())
        .expect("scenario catalog names are all valid")
}

/// The normalised scenario rows.
pub fn scenario_rows() -> Vec<Product> {
    rows(&scenario_products())
}
