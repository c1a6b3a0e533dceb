//! Selector widget: a single-row dropdown stand-in for picking one option.
//!
//! # Navigation (when focused)
//!
//! - `↑`/`k`, `←`/`h` highlight the previous option.
//! - `↓`/`j`, `→`/`l` highlight the next option.
//! - `Enter` commits the highlighted option.
//!
//! The widget shows `‹ option ›` while focused and the committed option (or a
//! placeholder) otherwise.

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
pub struct SelectorState {
    pub options: Vec<String>,
    /// Index of the highlighted option.
    pub cursor: usize,
    /// Index of the last committed option.
    pub committed: Option<usize>,
}

impl SelectorState {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            cursor: 0,
            committed: None,
        }
    }

    /// Replace the options and forget any selection.
    pub fn reset(&mut self, options: Vec<String>) {
        *self = Self::new(options);
    }

    pub fn committed_label(&self) -> Option<&str> {
        self.committed
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// Handle a navigation event. Returns the index just committed when the
    /// event was `Enter` on a non-empty selector.
    pub fn handle(&mut self, event: &AppEvent) -> Option<usize> {
        if self.options.is_empty() {
            return None;
        }
        let last = self.options.len() - 1;

        match event {
            AppEvent::Nav(Direction::Up | Direction::Left) => {
                self.cursor = if self.cursor == 0 { last } else { self.cursor - 1 };
                tracing::debug!(cursor = self.cursor, "selector: previous");
                None
            }
            AppEvent::Nav(Direction::Down | Direction::Right) => {
                self.cursor = if self.cursor >= last { 0 } else { self.cursor + 1 };
                tracing::debug!(cursor = self.cursor, "selector: next");
                None
            }
            AppEvent::Enter => {
                self.committed = Some(self.cursor);
                tracing::debug!(committed = self.cursor, "selector: committed");
                Some(self.cursor)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct Selector<'a> {
    title: &'a str,
    state: &'a SelectorState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Selector<'a> {
    pub fn new(title: &'a str, state: &'a SelectorState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            title,
            state,
            focused,
            theme,
        }
    }
}

impl Widget for Selector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.title)
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.state.options.is_empty() {
            Line::from(Span::styled("—", self.theme.selector_placeholder))
        } else if self.focused {
            let label = &self.state.options[self.state.cursor.min(self.state.options.len() - 1)];
            let style = if self.state.committed == Some(self.state.cursor) {
                self.theme.selector_committed
            } else {
                ratatui::style::Style::default()
            };
            Line::from(vec![
                Span::raw("‹ "),
                Span::styled(label.clone(), style),
                Span::raw(" ›"),
            ])
        } else {
            match self.state.committed_label() {
                Some(label) => Line::from(Span::styled(label.to_string(), self.theme.selector_committed)),
                None => Line::from(Span::styled("Select an item", self.theme.selector_placeholder)),
            }
        };

        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SelectorState {
        SelectorState::new(vec!["a".into(), "b".into(), "c".into()])
    }

    #[test]
    fn navigation_wraps() {
        let mut s = state();
        s.handle(&AppEvent::Nav(Direction::Up));
        assert_eq!(s.cursor, 2);
        s.handle(&AppEvent::Nav(Direction::Down));
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn enter_commits_highlight() {
        let mut s = state();
        s.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(s.handle(&AppEvent::Enter), Some(1));
        assert_eq!(s.committed_label(), Some("b"));
    }

    #[test]
    fn empty_selector_ignores_events() {
        let mut s = SelectorState::default();
        assert_eq!(s.handle(&AppEvent::Enter), None);
        assert_eq!(s.committed, None);
    }

    #[test]
    fn reset_forgets_selection() {
        let mut s = state();
        s.handle(&AppEvent::Enter);
        s.reset(vec!["x".into()]);
        assert_eq!(s.committed, None);
        assert_eq!(s.cursor, 0);
    }
}
