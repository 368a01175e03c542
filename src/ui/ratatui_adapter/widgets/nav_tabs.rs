//! Top navigation bar

use super::to_u16;
use crate::ui::ratatui_adapter::theme::Theme;
use crate::view::View;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Span,
    widgets::Widget,
};

const BRAND: &str = " recipebox ";

/// Brand plus one tab per view; the active view is highlighted
pub struct NavTabs<'a> {
    active: View,
    theme: &'a Theme,
}

impl<'a> NavTabs<'a> {
    #[must_use]
    pub const fn new(active: View, theme: &'a Theme) -> Self {
        Self { active, theme }
    }

    fn label(view: View) -> String {
        format!(" F{} {} ", view.index() + 1, view.label())
    }

    /// Where each tab is drawn inside `area`
    #[must_use]
    pub fn tab_areas(area: Rect) -> Vec<(View, Rect)> {
        let mut x = area.x.saturating_add(to_u16(BRAND.len() + 1));
        let right = area.x.saturating_add(area.width);
        let mut tabs = Vec::with_capacity(View::ALL.len());

        for view in View::ALL {
            let width = to_u16(Self::label(view).chars().count()).min(right.saturating_sub(x));
            tabs.push((view, Rect::new(x, area.y, width, area.height.min(1))));
            x = x.saturating_add(width).saturating_add(1);
        }
        tabs
    }
}

impl Widget for NavTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_span(area.x, area.y, &Span::styled(BRAND, self.theme.title_style()), area.width);

        for (view, tab) in Self::tab_areas(area) {
            let style = if view == self.active {
                self.theme.selected_style()
            } else {
                self.theme.dimmed_style()
            };
            buf.set_span(tab.x, tab.y, &Span::styled(Self::label(view), style), tab.width);
        }
    }
}
