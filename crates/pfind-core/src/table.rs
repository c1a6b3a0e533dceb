//! Product table model: the columns shown for each normalised row.

use crate::types::{FieldName, Product};

/// One table column: header label plus the field it displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub field: FieldName,
}

/// Columns in display order.
pub const COLUMNS: [Column; 5] = [
    Column { title: "Product Name", field: FieldName::ProductName },
    Column { title: "Category", field: FieldName::Category },
    Column { title: "Color", field: FieldName::Color },
    Column { title: "Weight (oz)", field: FieldName::Weight },
    Column { title: "Wireless", field: FieldName::Wireless },
];

/// Text for one cell. Absent fields render as an empty string.
pub fn cell_text(product: &Product, field: FieldName) -> String {
    product.get(field).map(ToString::to_string).unwrap_or_default()
}

/// All cells of a row, in [`COLUMNS`] order.
pub fn row_cells(product: &Product) -> Vec<String> {
    COLUMNS.iter().map(|c| cell_text(product, c.field)).collect()
}

/// Render rows as aligned plain text, one line per product, headed by the
/// column titles.
pub fn render_plain(products: &[Product]) -> String {
    let rows: Vec<Vec<String>> = products.iter().map(row_cells).collect();
    let widths: Vec<usize> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.title.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = pad_line(COLUMNS.iter().map(|c| c.title), &widths);
    out.push('\n');
    for row in &rows {
        out.push_str(&pad_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
