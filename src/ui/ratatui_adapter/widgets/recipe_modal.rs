//! Recipe details modal

use super::centered_rect;
use crate::render::DetailView;
use crate::ui::ratatui_adapter::theme::Theme;
use crate::ui::types::ModalContent;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

const CLOSE_LABEL: &str = "[x]";

/// Modal drawn over a cleared backdrop
pub struct RecipeModal<'a> {
    modal: &'a ModalContent,
    scroll: u16,
    theme: &'a Theme,
}

impl<'a> RecipeModal<'a> {
    #[must_use]
    pub const fn new(modal: &'a ModalContent, theme: &'a Theme) -> Self {
        Self {
            modal,
            scroll: 0,
            theme,
        }
    }

    #[must_use]
    pub const fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    /// Area the modal covers within `area`
    #[must_use]
    pub fn popup_area(area: Rect) -> Rect {
        centered_rect(80, 80, area)
    }

    /// Close button on the top border of `popup`
    #[must_use]
    pub fn close_button_area(popup: Rect) -> Rect {
        let width = 3_u16.min(popup.width);
        Rect::new(
            popup.x + popup.width.saturating_sub(width + 2),
            popup.y,
            width,
            1_u16.min(popup.height),
        )
    }

    fn heading(&self, text: &str) -> Line<'static> {
        Line::styled(text.to_string(), self.theme.title_style())
    }

    fn detail_lines(&self, view: &DetailView) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::styled(view.meta.clone(), self.theme.dimmed_style()),
            Line::from(vec![
                Span::styled(format!("⏱ {} min", view.prep_minutes), self.theme.dimmed_style()),
                Span::raw("  "),
                Span::styled(format!("★ {:.1}", view.rating), self.theme.rating_style()),
            ]),
        ];
        if !view.tags.is_empty() {
            lines.push(Line::styled(
                view.tags
                    .iter()
                    .map(|t| format!("#{t}"))
                    .collect::<Vec<_>>()
                    .join(" "),
                self.theme.tag_style(),
            ));
        }

        lines.push(Line::default());
        lines.push(self.heading("Ingredients"));
        for row in &view.ingredients {
            let mut spans = vec![Span::styled("• ", self.theme.accent_style())];
            if !row.measure.is_empty() {
                spans.push(Span::styled(format!("{} ", row.measure), self.theme.dimmed_style()));
            }
            spans.push(Span::raw(row.ingredient.clone()));
            lines.push(Line::from(spans));
        }

        lines.push(Line::default());
        lines.push(self.heading("Instructions"));
        lines.extend(view.paragraphs.iter().map(|p| Line::raw(p.clone())));

        if view.video.is_some() || view.source.is_some() {
            lines.push(Line::default());
        }
        if let Some(video) = &view.video {
            lines.push(Line::from(vec![
                Span::styled("▶ Watch video ", self.theme.accent_style()),
                Span::styled(format!("(v) {video}"), self.theme.dimmed_style()),
            ]));
        }
        if let Some(source) = &view.source {
            lines.push(Line::from(vec![
                Span::styled("↗ Original recipe ", self.theme.accent_style()),
                Span::styled(format!("(s) {source}"), self.theme.dimmed_style()),
            ]));
        }
        lines
    }
}

impl Widget for RecipeModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, lines) = match self.modal {
            ModalContent::Closed => return,
            ModalContent::Loading => (
                " Recipe ".to_string(),
                vec![Line::styled("Loading recipe...", self.theme.dimmed_style())],
            ),
            ModalContent::Message(text) => (
                " Recipe ".to_string(),
                vec![Line::styled(text.clone(), self.theme.warning_style())],
            ),
            ModalContent::Detail(view) => (format!(" {} ", view.name), self.detail_lines(view)),
        };

        let popup = Self::popup_area(area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.accent_style())
            .title(title)
            .title_alignment(Alignment::Center);

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(popup, buf);

        let close = Self::close_button_area(popup);
        buf.set_span(
            close.x,
            close.y,
            &Span::styled(CLOSE_LABEL, self.theme.error_style()),
            close.width,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, RecipeDetail, RecipeSummary};
    use crate::render::render_detail;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.bottom())
            .map(|y| {
                (area.x..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn arrabiata(video: Option<&str>) -> ModalContent {
        let summary = RecipeSummary::new("52771", "Spicy Arrabiata Penne", "")
            .with_category("Vegetarian")
            .with_area("Italian");
        let mut detail = RecipeDetail::new(summary, "Boil water.\nCook penne.");
        detail.ingredients.push(Ingredient::new("penne rigate", "1 pound"));
        detail.video = video.map(ToString::to_string);
        ModalContent::Detail(Box::new(render_detail(&detail)))
    }

    #[test]
    fn test_closed_modal_draws_nothing() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);

        RecipeModal::new(&ModalContent::Closed, &theme).render(area, &mut buf);

        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_detail_content() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);

        RecipeModal::new(&arrabiata(Some("https://youtu.be/x")), &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Spicy Arrabiata Penne"));
        assert!(text.contains("Vegetarian, Italian"));
        assert!(text.contains("1 pound penne rigate"));
        assert!(text.contains("Boil water."));
        assert!(text.contains("Cook penne."));
        assert!(text.contains("Watch video"));
        assert!(text.contains(CLOSE_LABEL));
    }

    #[test]
    fn test_video_affordance_only_with_link() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);

        RecipeModal::new(&arrabiata(None), &theme).render(area, &mut buf);

        assert!(!buffer_text(&buf).contains("Watch video"));
    }

    #[test]
    fn test_close_button_inside_popup() {
        let popup = RecipeModal::popup_area(Rect::new(0, 0, 100, 40));
        let close = RecipeModal::close_button_area(popup);
        assert_eq!(close.y, popup.y);
        assert!(close.right() < popup.right());
        assert!(close.x > popup.x);
    }
}
