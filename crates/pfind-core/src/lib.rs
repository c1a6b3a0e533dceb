//! pfind-core: product finder core library.
//!
//! Normalises sparse, property-id-keyed product records into flat rows and
//! evaluates a single filter clause over them. Everything here is a pure,
//! synchronous transform over in-memory data; the TUI and CLI are callers.
//!
//! # Pipeline
//!
//! ```text
//! Datastore ──► Normalizer ──► Filter ──► Table
//!                                ▲
//!                  FilterBuilder ┘
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod datastore;
pub mod error;
pub mod filter;
pub mod normalizer;
pub mod table;
pub mod types;

pub use builder::FilterBuilder;
pub use catalog::property_key;
pub use datastore::Datastore;
pub use error::{CatalogError, DatastoreError};
pub use filter::filter_products;
pub use normalizer::normalize_products;
pub use types::{
    FieldName, Filter, FilterValue, Operator, OperatorKind, Product, Property, PropertyType,
    RawProduct, Scalar,
};
