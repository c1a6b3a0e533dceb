//! Value input widget: free-text entry for string and number filter values.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! Every edit is reported back to the app shell so the filter updates as the
//! user types.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValueInputState {
    pub input: String,
    /// Byte offset of the cursor within `input`.
    pub cursor: usize,
}

impl ValueInputState {
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Handle a key event. Returns `true` when the text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.input.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(input = %self.input, cursor = self.cursor, "value: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                // Walk back one char boundary
                let prev = self.input[..self.cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                self.input.remove(prev);
                self.cursor = prev;
                tracing::debug!(input = %self.input, cursor = self.cursor, "value: backspace");
                true
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.input[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.input.len() {
                    self.cursor = self.input[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.input.len());
                }
                false
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ValueInput<'a> {
    state: &'a ValueInputState,
    placeholder: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ValueInput<'a> {
    pub fn new(
        state: &'a ValueInputState,
        placeholder: &'a str,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            placeholder,
            focused,
            theme,
        }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.state.input[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(2));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for ValueInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Value")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.state.input.is_empty() && !self.focused {
            Line::from(Span::styled(self.placeholder, self.theme.selector_placeholder))
        } else {
            Line::from(self.state.input.as_str())
        };
        Paragraph::new(line).render(inner, buf);
    }
}
