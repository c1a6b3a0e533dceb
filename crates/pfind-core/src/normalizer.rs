//! Normalizer: projects sparse [`RawProduct`]s into flat [`Product`] rows.
//!
//! For each raw property value the normaliser looks up the catalog property,
//! coerces the value by the property's declared type, drops values that are
//! not present (empty text, zero, NaN), and writes the rest into the field
//! named by [`property_key`]. Unknown property ids are skipped.

use std::collections::HashMap;

use crate::catalog::property_key;
use crate::error::CatalogError;
use crate::types::{Product, Property, PropertyType, RawProduct, Scalar};

/// What to do with text that does not parse as a number when coercing a
/// `number` property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidNumber {
    /// Treat it as `0`. With the default falsy-drop this omits the field.
    #[default]
    Zero,
    /// Drop the value outright, even when falsy values are kept.
    Skip,
}

/// Tunables for [`Normalizer`]. The defaults reproduce the behaviour of
/// [`normalize_products`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub invalid_number: InvalidNumber,
    /// Omit fields whose coerced value is empty text, zero, or NaN.
    pub drop_falsy: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            invalid_number: InvalidNumber::Zero,
            drop_falsy: true,
        }
    }
}

/// Normalise `products` against `properties` with the default options.
///
/// Fails with [`CatalogError::InvalidPropertyKey`] if a catalog property
/// referenced by a product carries a name outside the static field table.
pub fn normalize_products(
    products: &[RawProduct],
    properties: &[Property],
) -> Result<Vec<Product>, CatalogError> {
    Normalizer::new(properties).normalize(products)
}

/// A property catalog indexed by id, ready to normalise many products.
pub struct Normalizer<'a> {
    by_id: HashMap<i64, &'a Property>,
    options: NormalizeOptions,
}

impl<'a> Normalizer<'a> {
    pub fn new(properties: &'a [Property]) -> Self {
        let mut by_id = HashMap::with_capacity(properties.len());
        for property in properties {
            // First declaration of an id wins.
            by_id.entry(property.id).or_insert(property);
        }
        Self {
            by_id,
            options: NormalizeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn normalize(&self, products: &[RawProduct]) -> Result<Vec<Product>, CatalogError> {
        let rows = products
            .iter()
            .map(|raw| self.normalize_one(raw))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(rows = rows.len(), properties = self.by_id.len(), "normalised products");
        Ok(rows)
    }

    pub fn normalize_one(&self, raw: &RawProduct) -> Result<Product, CatalogError> {
        let mut product = Product::new(raw.id);

        for pv in &raw.property_values {
            let Some(property) = self.by_id.get(&pv.property_id) else {
                tracing::trace!(
                    product = raw.id,
                    property_id = pv.property_id,
                    "skipping value for unknown property"
                );
                continue;
            };

            let Some(value) = self.coerce(property.kind, &pv.value) else {
                continue;
            };

            if self.options.drop_falsy && !value.is_present() {
                tracing::trace!(product = raw.id, property = %property.name, "dropping empty value");
                continue;
            }

            let field = property_key(&property.name)?;
            product.set(field, value);
        }

        Ok(product)
    }

    fn coerce(&self, kind: PropertyType, raw: &Scalar) -> Option<Scalar> {
        match kind {
            PropertyType::String => Some(Scalar::Text(raw.to_string())),
            PropertyType::Number => {
                let n = match raw {
                    Scalar::Number(n) => Some(*n),
                    Scalar::Text(t) => parse_number(t),
                };
                match (n, self.options.invalid_number) {
                    (Some(n), _) => Some(Scalar::Number(n)),
                    (None, InvalidNumber::Zero) => Some(Scalar::Number(0.0)),
                    (None, InvalidNumber::Skip) => None,
                }
            }
            PropertyType::Enumerated => Some(raw.clone()),
            PropertyType::Unknown => None,
        }
    }
}

/// Lenient decimal parse: surrounding whitespace is ignored, blank text is
/// `0`, and `Infinity` is accepted. Anything else that is not a decimal
/// literal yields `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let t = text.trim();
    match t {
        "" => return Some(0.0),
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // Rust accepts "inf" and "nan" spellings; decimal literals only here.
    if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    t.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
