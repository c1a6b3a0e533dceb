//! Header widget: the one-line banner at the top of the screen.

use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Renders the application banner with keybinding hints (`q:quit  ?:help`)
/// right-aligned in the same row.
pub struct Header<'a> {
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self { title, theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.header_banner);
        buf.set_string(
            area.x + 1,
            area.y,
            self.title,
            self.theme.header_banner,
        );

        let hint = " x:clear  q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        if hint_x > area.x + 1 + self.title.len() as u16 {
            buf.set_string(hint_x, area.y, hint, self.theme.header_hint);
        }
    }
}
