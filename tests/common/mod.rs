//! Shared test utilities for pfind integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. All helpers are deterministic and build their data in
//! memory; nothing touches the user's config directory.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
