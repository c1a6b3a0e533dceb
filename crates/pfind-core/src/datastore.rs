//! Datastore: the in-memory property catalog, operator catalog, and raw
//! products, loaded from JSON.
//!
//! A small sample dataset is embedded in the binary so the application runs
//! without any files on disk; [`Datastore::from_path`] loads a user dataset
//! with the same shape:
//!
//! ```json
//! {
//!   "properties": [{ "id": 0, "name": "Product Name", "type": "string" }],
//!   "operators":  [{ "id": "equals", "text": "Equals" }],
//!   "products":   [{ "id": 0, "property_values": [{ "property_id": 0, "value": "Cup" }] }]
//! }
//! ```
//!
//! `operators` may be omitted, in which case the built-in catalog is used.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::default_operators;
use crate::error::{CatalogError, DatastoreError};
use crate::normalizer::normalize_products;
use crate::types::{Operator, Product, Property, RawProduct};

const SAMPLE_DATASTORE: &str = include_str!("../data/sample.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datastore {
    properties: Vec<Property>,
    #[serde(default = "default_operators")]
    operators: Vec<Operator>,
    #[serde(default)]
    products: Vec<RawProduct>,
}

impl Datastore {
    pub fn new(properties: Vec<Property>, operators: Vec<Operator>, products: Vec<RawProduct>) -> Self {
        Self {
            properties,
            operators,
            products,
        }
    }

    /// The embedded sample dataset.
    ///
    /// # Panics
    ///
    /// Panics if the embedded JSON is malformed, which would be a build
    /// defect caught by the test suite.
    pub fn sample() -> Self {
        Self::from_json(SAMPLE_DATASTORE).expect("embedded sample datastore must be valid JSON")
    }

    pub fn from_json(src: &str) -> Result<Self, DatastoreError> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, DatastoreError> {
        let src = std::fs::read_to_string(path).map_err(|source| DatastoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json(&src)?;
        tracing::info!(
            path = %path.display(),
            properties = store.properties.len(),
            products = store.products.len(),
            "datastore loaded"
        );
        Ok(store)
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn products(&self) -> &[RawProduct] {
        &self.products
    }

    /// Normalise every raw product against this datastore's catalog.
    pub fn normalized(&self) -> Result<Vec<Product>, CatalogError> {
        normalize_products(&self.products, &self.properties)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
