//! Core types for pfind-core.
//!
//! This module defines the data model shared by every layer: the property and
//! operator catalogs, the sparse [`RawProduct`] as ingested, the flat
//! normalised [`Product`] row, and the single-clause [`Filter`].

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

/// A single text-or-number value, used both for raw property values and for
/// the fields of a normalised [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Present values carry information; empty text, zero, and NaN do not.
    ///
    /// The normaliser drops fields whose coerced value is not present, so a
    /// weight of `0` is indistinguishable from a missing weight.
    pub fn is_present(&self) -> bool {
        match self {
            Scalar::Text(s) => !s.is_empty(),
            Scalar::Number(n) => *n != 0.0 && !n.is_nan(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            Scalar::Number(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

/// Render a number the way it is shown to users and compared as text:
/// integral values without a fractional part, everything else in the
/// shortest form that round-trips.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        // Covers -0.0 as well.
        "0".to_string()
    } else {
        format!("{n}")
    }
}

// ---------------------------------------------------------------------------
// Property catalog
// ---------------------------------------------------------------------------

/// Declared type of a catalog property. Drives value coercion during
/// normalisation and the set of legal filter operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Enumerated,
    /// Any type name this build does not know about. Values of unknown-typed
    /// properties are dropped during normalisation.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::String => write!(f, "string"),
            PropertyType::Number => write!(f, "number"),
            PropertyType::Enumerated => write!(f, "enumerated"),
            PropertyType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Schema for one product attribute, loaded once from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    /// Display name, e.g. `"weight (oz)"`. Resolved to a [`FieldName`] via
    /// [`property_key`](crate::catalog::property_key).
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    /// Allowed values, in display order. Only meaningful for enumerated
    /// properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl Property {
    pub fn new(id: i64, name: impl Into<String>, kind: PropertyType) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            values: None,
        }
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

// ---------------------------------------------------------------------------
// Operator catalog
// ---------------------------------------------------------------------------

/// Comparison rule of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    Equals,
    GreaterThan,
    LessThan,
    /// Field has any value.
    #[serde(rename = "any")]
    HasValue,
    /// Field has no value.
    #[serde(rename = "none")]
    NoValue,
    In,
    Contains,
    /// Operator id this build does not know about. Filters using it keep
    /// every row.
    #[serde(other)]
    Unknown,
}

/// A selectable operator: its kind plus the label shown in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub id: OperatorKind,
    pub text: String,
}

impl Operator {
    pub fn new(id: OperatorKind, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

impl From<OperatorKind> for Operator {
    fn from(kind: OperatorKind) -> Self {
        Operator::new(kind, kind.label())
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// One `{property_id, value}` pair of a raw product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub property_id: i64,
    pub value: Scalar,
}

/// A product as ingested: a sparse list of property values. A property
/// missing from the list means "no value".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    pub id: i64,
    #[serde(default)]
    pub property_values: Vec<PropertyValue>,
}

impl RawProduct {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            property_values: Vec::new(),
        }
    }

    pub fn with_value(mut self, property_id: i64, value: impl Into<Scalar>) -> Self {
        self.property_values.push(PropertyValue {
            property_id,
            value: value.into(),
        });
        self
    }
}

/// The fixed set of fields a normalised [`Product`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    ProductName,
    Color,
    Weight,
    Category,
    Wireless,
}

impl FieldName {
    pub const ALL: [FieldName; 5] = [
        FieldName::ProductName,
        FieldName::Color,
        FieldName::Weight,
        FieldName::Category,
        FieldName::Wireless,
    ];

    /// The serialised field key, e.g. `"productName"`.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::ProductName => "productName",
            FieldName::Color => "color",
            FieldName::Weight => "weight",
            FieldName::Category => "category",
            FieldName::Wireless => "wireless",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalised product row.
///
/// Every field except `id` is optional: source data is sparse, and the
/// normaliser omits fields whose coerced value is not present (see
/// [`Scalar::is_present`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wireless: Option<Scalar>,
}

impl Product {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn get(&self, field: FieldName) -> Option<&Scalar> {
        self.slot(field).as_ref()
    }

    pub fn set(&mut self, field: FieldName, value: Scalar) {
        *self.slot_mut(field) = Some(value);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: FieldName, value: impl Into<Scalar>) -> Self {
        self.set(field, value.into());
        self
    }

    fn slot(&self, field: FieldName) -> &Option<Scalar> {
        match field {
            FieldName::ProductName => &self.product_name,
            FieldName::Color => &self.color,
            FieldName::Weight => &self.weight,
            FieldName::Category => &self.category,
            FieldName::Wireless => &self.wireless,
        }
    }

    fn slot_mut(&mut self, field: FieldName) -> &mut Option<Scalar> {
        match field {
            FieldName::ProductName => &mut self.product_name,
            FieldName::Color => &mut self.color,
            FieldName::Weight => &mut self.weight,
            FieldName::Category => &mut self.category,
            FieldName::Wireless => &mut self.wireless,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter clause
// ---------------------------------------------------------------------------

/// The value side of a filter clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FilterValue {
    pub fn is_empty_text(&self) -> bool {
        matches!(self, FilterValue::Text(t) if t.is_empty())
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(n) => f.write_str(&format_number(*n)),
            FilterValue::Text(t) => f.write_str(t),
            FilterValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

/// A single `(property, operator, value)` filter clause. At most one is
/// active at a time. `value` is `None` for the `any` / `none` operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub property: Property,
    pub operator: Operator,
    #[serde(default)]
    pub value: Option<FilterValue>,
}

impl Filter {
    pub fn new(property: Property, operator: impl Into<Operator>, value: Option<FilterValue>) -> Self {
        Self {
            property,
            operator: operator.into(),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
