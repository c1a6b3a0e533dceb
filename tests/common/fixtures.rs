#![allow(dead_code)]
//! Static catalogs and product sets used across harnesses.
//!
//! The "scenario" catalog mirrors the worked examples the filter semantics
//! are defined by: two electronics products, ids 11 and 22, with every field
//! populated.

use pfind_core::{Operator, OperatorKind, Property, PropertyType, RawProduct};

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

pub const PRODUCT_NAME: i64 = 1;
pub const COLOR: i64 = 2;
pub const WEIGHT: i64 = 3;
pub const CATEGORY: i64 = 4;
pub const WIRELESS: i64 = 5;

/// The five catalog properties, one per known field.
pub fn scenario_properties() -> Vec<Property> {
    vec![
        Property::new(PRODUCT_NAME, "Product Name", PropertyType::String),
        Property::new(COLOR, "color", PropertyType::String),
        Property::new(WEIGHT, "weight (oz)", PropertyType::Number),
        Property::new(CATEGORY, "category", PropertyType::Enumerated)
            .with_values(["Electronics", "Tools", "Kitchen"]),
        Property::new(WIRELESS, "wireless", PropertyType::Enumerated).with_values(["true", "false"]),
    ]
}

/// Look up one of [`scenario_properties`] by id.
pub fn property(id: i64) -> Property {
    scenario_properties()
        .into_iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| panic!("no scenario property with id {id}"))
}

pub fn operator(kind: OperatorKind) -> Operator {
    Operator::from(kind)
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Two fully populated products, ids 11 and 22.
pub fn scenario_products() -> Vec<RawProduct> {
    vec![
        RawProduct::new(11)
            .with_value(PRODUCT_NAME, "Wireless Headphones")
            .with_value(COLOR, "black")
            .with_value(WEIGHT, 5.2)
            .with_value(CATEGORY, "Electronics")
            .with_value(WIRELESS, "true"),
        RawProduct::new(22)
            .with_value(PRODUCT_NAME, "Bluetooth Speaker")
            .with_value(COLOR, "blue")
            .with_value(WEIGHT, 8.5)
            .with_value(CATEGORY, "Electronics")
            .with_value(WIRELESS, "true"),
    ]
}

/// Products exercising the sparse and falsy-drop paths.
pub fn sparse_products() -> Vec<RawProduct> {
    vec![
        // Only a name.
        RawProduct::new(1).with_value(PRODUCT_NAME, "Key"),
        // Empty color, zero weight.
        RawProduct::new(2)
            .with_value(PRODUCT_NAME, "Cup")
            .with_value(COLOR, "")
            .with_value(WEIGHT, 0.0),
        // Weight as text, color as a number.
        RawProduct::new(3)
            .with_value(PRODUCT_NAME, "Hammer")
            .with_value(COLOR, 7.0)
            .with_value(WEIGHT, " 19 "),
        // Unparseable weight and a property id the catalog does not know.
        RawProduct::new(4)
            .with_value(PRODUCT_NAME, "Drill")
            .with_value(WEIGHT, "heavy")
            .with_value(99, "ignored"),
        // No values at all.
        RawProduct::new(5),
    ]
}
