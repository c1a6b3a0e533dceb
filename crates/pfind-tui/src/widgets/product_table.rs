//! Product table widget: the scrollable list of filtered products.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row (scrolls view if needed) |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Move up one page |
//! | `PageDown` / `Ctrl+d` | Move down one page |
//!
//! # Scroll semantics
//!
//! `offset` = index of the first visible row. `cursor` = absolute index into
//! `rows`. The cursor is always kept within the visible window.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use pfind_core::table::{cell_text, COLUMNS};
use pfind_core::Product;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{
        Block, Cell as TableCell, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, StatefulWidget, Table, Widget,
    },
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct ProductTableState {
    pub rows: Vec<Product>,
    /// Total rows before filtering, shown in the title.
    pub total: usize,
    pub offset: usize,
    pub cursor: usize,
    pub show_ids: bool,
    /// Cached from the last render so `handle()` can page correctly.
    last_height: Cell<usize>,
}

impl ProductTableState {
    pub fn new(rows: Vec<Product>) -> Self {
        let total = rows.len();
        Self {
            rows,
            total,
            offset: 0,
            cursor: 0,
            show_ids: false,
            last_height: Cell::new(20),
        }
    }

    /// Replace the visible rows (after a filter change) and reset the view.
    pub fn set_rows(&mut self, rows: Vec<Product>) {
        self.rows = rows;
        self.offset = 0;
        self.cursor = 0;
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    fn keep_cursor_visible(&mut self) {
        let h = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + h {
            self.offset = self.cursor + 1 - h;
        }
    }

    pub fn handle(&mut self, event: &AppEvent) {
        if self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() - 1;

        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                self.cursor = (self.cursor + 1).min(last);
            }
            AppEvent::ScrollUp => {
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
            }
            AppEvent::ScrollDown => {
                self.cursor = (self.cursor + PAGE_STEP).min(last);
            }
            _ => return,
        }
        self.keep_cursor_visible();
        tracing::debug!(cursor = self.cursor, offset = self.offset, "table: moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ProductTable<'a> {
    state: &'a ProductTableState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ProductTable<'a> {
    pub fn new(state: &'a ProductTableState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }
}

impl Widget for ProductTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            " Product List ({} of {}) ",
            self.state.rows.len(),
            self.state.total
        );
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.state.rows.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No products match the current filter",
                self.theme.table_empty,
            )))
            .render(inner, buf);
            return;
        }

        // One line for the header row.
        let height = (inner.height as usize).saturating_sub(1);
        self.state.last_height.set(height);

        let start = self.state.offset.min(self.state.rows.len().saturating_sub(1));
        let end = (start + height).min(self.state.rows.len());

        let mut header: Vec<TableCell> = Vec::new();
        let mut widths: Vec<Constraint> = Vec::new();
        if self.state.show_ids {
            header.push(TableCell::from("Id"));
            widths.push(Constraint::Length(5));
        }
        for column in COLUMNS {
            header.push(TableCell::from(column.title));
            widths.push(Constraint::Fill(1));
        }

        let rows: Vec<Row> = self.state.rows[start..end]
            .iter()
            .enumerate()
            .map(|(i, product)| {
                let mut cells: Vec<TableCell> = Vec::with_capacity(COLUMNS.len() + 1);
                if self.state.show_ids {
                    cells.push(TableCell::from(product.id.to_string()));
                }
                cells.extend(
                    COLUMNS
                        .iter()
                        .map(|c| TableCell::from(cell_text(product, c.field))),
                );
                let style = if self.focused && start + i == self.state.cursor {
                    self.theme.table_cursor
                } else {
                    self.theme.table_row
                };
                Row::new(cells).style(style)
            })
            .collect();

        // Leave a 1-column strip for the scrollbar inside the block.
        let table_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Widget::render(
            Table::new(rows, widths)
                .header(Row::new(header).style(self.theme.table_header))
                .column_spacing(2),
            table_area,
            buf,
        );

        let mut sb_state = ScrollbarState::new(self.state.rows.len())
            .position(start)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}
