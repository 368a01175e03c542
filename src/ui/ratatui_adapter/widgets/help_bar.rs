//! Help bar widget for displaying keybind hints

use crate::ui::ratatui_adapter::state::Focus;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// Key combination (e.g., "Tab", "F2")
    pub key: &'static str,
    /// Action description (e.g., "details", "favorite")
    pub action: &'static str,
}

impl KeyHint {
    #[must_use]
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints relevant to the current focus
    #[must_use]
    pub fn hints_for(focus: Focus, modal_open: bool) -> Vec<KeyHint> {
        if modal_open {
            return vec![
                KeyHint::new("Esc", "close"),
                KeyHint::new("↑↓", "scroll"),
                KeyHint::new("v", "video"),
                KeyHint::new("s", "source"),
            ];
        }

        let mut hints = vec![
            KeyHint::new("F1-F3", "views"),
            KeyHint::new("Tab", "focus"),
        ];
        match focus {
            Focus::Search => {
                hints.push(KeyHint::new("Enter", "search"));
                hints.push(KeyHint::new("ctrl+c", "quit"));
            }
            Focus::Cards => {
                hints.push(KeyHint::new("←↑↓→", "move"));
                hints.push(KeyHint::new("Enter", "details"));
                hints.push(KeyHint::new("f", "favorite"));
                hints.push(KeyHint::new("/", "search"));
                hints.push(KeyHint::new("q", "quit"));
            }
        }
        hints
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key, self.theme.accent_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_hints_replace_card_hints() {
        let hints = HelpBar::hints_for(Focus::Cards, true);
        assert!(hints.iter().any(|h| h.action == "close"));
        assert!(!hints.iter().any(|h| h.action == "favorite"));
    }

    #[test]
    fn test_card_focus_offers_favorite() {
        let hints = HelpBar::hints_for(Focus::Cards, false);
        assert!(hints.contains(&KeyHint::new("f", "favorite")));
    }
}
