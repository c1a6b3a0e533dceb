//! pfind: Product Finder
//!
//! Terminal product catalog browser. This crate wires the core library and
//! the TUI into a binary and exposes the non-interactive `list` path as a
//! module so integration tests can drive it directly.
//!
//! # Architecture
//!
//! ```text
//! Datastore ──► Normalizer ──► Filter ──► TUI table
//!                                 │
//!                                 └──► cli::list (plain text / JSON)
//! ```

pub mod cli;
