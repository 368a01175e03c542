//! Status bar widget for displaying messages

use crate::ui::output::MessageLevel;
use crate::ui::ratatui_adapter::state::StatusMessage;
use crate::ui::ratatui_adapter::theme::Theme;
use crate::view::View;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Most recent message on the left, active view and favorites count on the right
pub struct StatusBar<'a> {
    messages: &'a [&'a StatusMessage],
    theme: &'a Theme,
    view: View,
    favorites: Option<usize>,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(messages: &'a [&'a StatusMessage], theme: &'a Theme, view: View) -> Self {
        Self {
            messages,
            theme,
            view,
            favorites: None,
        }
    }

    /// Show how many favorites are saved
    #[must_use]
    pub const fn with_favorites(mut self, count: usize) -> Self {
        self.favorites = Some(count);
        self
    }

    fn style_for_level(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => self.theme.success_style(),
            MessageLevel::Error => self.theme.error_style(),
            MessageLevel::Warning => self.theme.warning_style(),
            MessageLevel::Info => self.theme.info_style(),
            MessageLevel::Normal => self.theme.normal_style(),
        }
    }

    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
            MessageLevel::Normal => "",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(75), Constraint::Percentage(25)]).areas(inner);

        if let Some(msg) = self.messages.last() {
            let style = self.style_for_level(msg.level);
            let line = Line::from(vec![
                Span::styled(Self::prefix_for_level(msg.level), style),
                Span::styled(msg.text.as_str(), style),
            ]);
            Paragraph::new(line).render(left, buf);
        }

        let mut indicator = format!("[{}]", self.view);
        if let Some(count) = self.favorites {
            indicator.push_str(&format!(" ♥ {count}"));
        }
        Paragraph::new(Line::styled(indicator, self.theme.dimmed_style()).right_aligned())
            .render(right, buf);
    }
}
