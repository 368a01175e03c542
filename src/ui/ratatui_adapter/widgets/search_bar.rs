//! Search bar widget for query input

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const HINT: &str = "Search by recipe name or ingredient";

/// Search input with cursor; shows a hint while empty
pub struct SearchBar<'a> {
    query: &'a str,
    /// Byte offset of the cursor in `query`
    cursor: usize,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> SearchBar<'a> {
    #[must_use]
    pub const fn new(query: &'a str, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            query,
            cursor,
            theme,
            focused: true,
        }
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn caret(&self) -> Span<'static> {
        if self.focused {
            Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK))
        } else {
            Span::raw("")
        }
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.accent_style()
        } else {
            self.theme.border_style()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search ")
            .title_bottom(Line::styled(" Enter to search ", self.theme.dimmed_style()).right_aligned());

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![Span::styled("🔍 ", self.theme.dimmed_style())];
        if self.query.is_empty() {
            spans.push(self.caret());
            spans.push(Span::styled(HINT, self.theme.dimmed_style()));
        } else {
            let split = self.cursor.min(self.query.len());
            let (before, after) = self.query.split_at(split);
            spans.push(Span::raw(before));
            spans.push(self.caret());
            spans.push(Span::raw(after));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
