//! Catalog lookups: the static property-name table and the operator catalog.
//!
//! Property display names map to exactly one [`FieldName`] through a
//! compile-time table. Lookups fail closed: a name that is not in the table is
//! an [`CatalogError::InvalidPropertyKey`], never a silent default.

use phf::phf_map;

use crate::error::CatalogError;
use crate::types::{FieldName, Operator, OperatorKind, Property, PropertyType};

static PROPERTY_FIELDS: phf::Map<&'static str, FieldName> = phf_map! {
    "Product Name" => FieldName::ProductName,
    "color" => FieldName::Color,
    "weight (oz)" => FieldName::Weight,
    "category" => FieldName::Category,
    "wireless" => FieldName::Wireless,
};

/// Resolve a property display name to the product field it populates.
///
/// Matching is exact and case-sensitive.
pub fn property_key(name: &str) -> Result<FieldName, CatalogError> {
    PROPERTY_FIELDS
        .get(name)
        .copied()
        .ok_or_else(|| CatalogError::InvalidPropertyKey {
            name: name.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

impl OperatorKind {
    /// Every known operator, in display order.
    pub const ALL: [OperatorKind; 7] = [
        OperatorKind::Equals,
        OperatorKind::GreaterThan,
        OperatorKind::LessThan,
        OperatorKind::HasValue,
        OperatorKind::NoValue,
        OperatorKind::In,
        OperatorKind::Contains,
    ];

    /// Wire id, e.g. `"greater_than"`.
    pub fn id(self) -> &'static str {
        match self {
            OperatorKind::Equals => "equals",
            OperatorKind::GreaterThan => "greater_than",
            OperatorKind::LessThan => "less_than",
            OperatorKind::HasValue => "any",
            OperatorKind::NoValue => "none",
            OperatorKind::In => "in",
            OperatorKind::Contains => "contains",
            OperatorKind::Unknown => "unknown",
        }
    }

    /// Default display label.
    pub fn label(self) -> &'static str {
        match self {
            OperatorKind::Equals => "Equals",
            OperatorKind::GreaterThan => "Is greater than",
            OperatorKind::LessThan => "Is less than",
            OperatorKind::HasValue => "Has any value",
            OperatorKind::NoValue => "Has no value",
            OperatorKind::In => "Is any of",
            OperatorKind::Contains => "Contains",
            OperatorKind::Unknown => "Unknown",
        }
    }

    /// Parse a wire id. Unrecognised ids yield [`OperatorKind::Unknown`].
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.id() == id)
            .unwrap_or(OperatorKind::Unknown)
    }

    /// `false` for the operators that test presence only.
    pub fn takes_value(self) -> bool {
        !matches!(self, OperatorKind::HasValue | OperatorKind::NoValue)
    }
}

impl PropertyType {
    /// Operators that may be applied to a property of this type.
    pub fn operators(self) -> &'static [OperatorKind] {
        match self {
            PropertyType::String => &[
                OperatorKind::Equals,
                OperatorKind::HasValue,
                OperatorKind::NoValue,
                OperatorKind::In,
                OperatorKind::Contains,
            ],
            PropertyType::Number => &[
                OperatorKind::Equals,
                OperatorKind::GreaterThan,
                OperatorKind::LessThan,
                OperatorKind::HasValue,
                OperatorKind::NoValue,
            ],
            PropertyType::Enumerated => &[
                OperatorKind::Equals,
                OperatorKind::HasValue,
                OperatorKind::NoValue,
            ],
            PropertyType::Unknown => &[],
        }
    }
}

/// The built-in operator catalog with default labels.
pub fn default_operators() -> Vec<Operator> {
    OperatorKind::ALL.into_iter().map(Operator::from).collect()
}

/// Narrow `operators` to those legal for `property`, preserving catalog
/// order. With no property selected every operator is offered.
pub fn valid_operators(operators: &[Operator], property: Option<&Property>) -> Vec<Operator> {
    match property {
        None => operators.to_vec(),
        Some(p) => {
            let legal = p.kind.operators();
            operators
                .iter()
                .filter(|op| legal.contains(&op.id))
                .cloned()
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
