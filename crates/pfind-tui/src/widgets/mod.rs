//! Ratatui widgets for the pfind TUI.

pub mod header;
pub mod help;
pub mod product_table;
pub mod selector;
pub mod value_input;
