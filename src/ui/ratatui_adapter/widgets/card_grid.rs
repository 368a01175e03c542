//! Card container widget
//!
//! Draws a titled container holding either recipe cards or a placeholder.
//! Grid containers wrap cards into rows; horizontal containers draw a single
//! strip. Both scroll so the cursor card stays visible.

use super::to_u16;
use crate::render::{Card, ContainerContent, ContainerId, LayoutHint};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub const CARD_WIDTH: u16 = 34;
pub const CARD_HEIGHT: u16 = 6;

/// Clickable heart inside a card slot
#[must_use]
pub fn heart_area(slot: Rect) -> Rect {
    Rect::new(
        slot.x + slot.width.saturating_sub(4),
        slot.y + 1_u16.min(slot.height),
        2_u16.min(slot.width),
        1_u16.min(slot.height.saturating_sub(1)),
    )
}

/// A container with its cards
pub struct CardGrid<'a> {
    container: ContainerId,
    content: Option<&'a ContainerContent>,
    cursor: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> CardGrid<'a> {
    #[must_use]
    pub const fn new(
        container: ContainerId,
        content: Option<&'a ContainerContent>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            container,
            content,
            cursor: 0,
            focused: false,
            theme,
        }
    }

    /// Highlight the card at `cursor` when focused
    #[must_use]
    pub const fn cursor(mut self, cursor: usize, focused: bool) -> Self {
        self.cursor = cursor;
        self.focused = focused;
        self
    }

    fn block(&self) -> Block<'static> {
        let border = if self.focused {
            self.theme.accent_style()
        } else {
            self.theme.border_style()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", self.container.title()))
    }

    /// Cards per row inside `area`
    #[must_use]
    pub fn columns(&self, area: Rect) -> usize {
        match self.layout() {
            LayoutHint::Grid => usize::from((self.block().inner(area).width / CARD_WIDTH).max(1)),
            LayoutHint::Horizontal => 1,
        }
    }

    fn layout(&self) -> LayoutHint {
        match self.content {
            Some(ContainerContent::Cards { layout, .. }) => *layout,
            _ => self.container.layout(),
        }
    }

    /// Visible card indices and their slots when drawn into `area`
    #[must_use]
    pub fn slots(&self, area: Rect) -> Vec<(usize, Rect)> {
        let count = self.content.map_or(0, |c| c.cards().len());
        if count == 0 {
            return Vec::new();
        }
        let inner = self.block().inner(area);
        if inner.width == 0 || inner.height == 0 {
            return Vec::new();
        }
        let cursor = self.cursor.min(count - 1);
        let bottom = inner.y + inner.height;

        let place = |row: usize, col: usize| {
            let x = inner.x + to_u16(col) * CARD_WIDTH;
            let y = inner.y + to_u16(row) * CARD_HEIGHT;
            Rect::new(
                x,
                y,
                CARD_WIDTH.min(inner.right().saturating_sub(x)),
                CARD_HEIGHT.min(bottom.saturating_sub(y)),
            )
        };

        match self.layout() {
            LayoutHint::Grid => {
                let cols = usize::from((inner.width / CARD_WIDTH).max(1));
                let rows = usize::from((inner.height / CARD_HEIGHT).max(1));
                let first_row = (cursor / cols).saturating_sub(rows - 1);
                let start = first_row * cols;
                let end = count.min(start + rows * cols);
                (start..end)
                    .map(|idx| (idx, place(idx / cols - first_row, idx % cols)))
                    .collect()
            }
            LayoutHint::Horizontal => {
                let visible = usize::from((inner.width / CARD_WIDTH).max(1));
                let first = cursor.saturating_sub(visible - 1);
                let end = count.min(first + visible);
                (first..end).map(|idx| (idx, place(0, idx - first))).collect()
            }
        }
    }

    fn render_card(&self, card: &Card, slot: Rect, selected: bool, buf: &mut Buffer) {
        let border = if selected {
            self.theme.accent_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::default().borders(Borders::ALL).border_style(border);
        let inner = block.inner(slot);
        block.render(slot, buf);

        let lines = vec![
            Line::from(vec![
                Span::styled(format!("⏱ {} min", card.prep_minutes), self.theme.dimmed_style()),
                Span::raw("  "),
                Span::styled(format!("★ {:.1}", card.rating), self.theme.rating_style()),
            ]),
            Line::styled(card.name.clone(), self.theme.title_style()),
            Line::styled(card.meta.clone(), self.theme.dimmed_style()),
            Line::styled(
                "[ View Details ]",
                if selected {
                    self.theme.accent_style()
                } else {
                    self.theme.dimmed_style()
                },
            ),
        ];
        Paragraph::new(lines).render(inner, buf);

        let heart = heart_area(slot);
        if heart.height > 0 {
            let glyph = if card.favorite { "♥" } else { "♡" };
            buf.set_span(
                heart.x,
                heart.y,
                &Span::styled(glyph, self.theme.heart_style(card.favorite)),
                heart.width,
            );
        }
    }
}

impl Widget for CardGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        match self.content {
            None => {}
            Some(ContainerContent::Placeholder(placeholder)) => {
                Paragraph::new(Line::styled(placeholder.text(), self.theme.dimmed_style()))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .render(inner, buf);
            }
            Some(content @ ContainerContent::Cards { .. }) => {
                let cards = content.cards();
                for (idx, slot) in self.slots(area) {
                    let selected = self.focused && idx == self.cursor.min(cards.len() - 1);
                    self.render_card(&cards[idx], slot, selected, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavoritesSet;
    use crate::models::RecipeSummary;
    use crate::render::{Placeholder, render_cards};

    fn content(n: usize, layout: LayoutHint, favorites: &FavoritesSet) -> ContainerContent {
        let recipes: Vec<RecipeSummary> = (0..n)
            .map(|i| RecipeSummary::new(i.to_string(), format!("Dish {i}"), ""))
            .collect();
        render_cards(&recipes, favorites, layout, ContainerId::Home)
    }

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

    #[test]
    fn test_grid_wraps_into_rows() {
        let theme = Theme::default();
        let content = content(5, LayoutHint::Grid, &FavoritesSet::default());
        let grid = CardGrid::new(ContainerId::Home, Some(&content), &theme);
        // two columns, three rows of space
        let area = Rect::new(0, 0, 2 * CARD_WIDTH + 2, 3 * CARD_HEIGHT + 2);

        let slots = grid.slots(area);

        assert_eq!(slots.len(), 5);
        assert_eq!(grid.columns(area), 2);
        assert_eq!(slots[2].1.y, slots[0].1.y + CARD_HEIGHT);
        assert_eq!(slots[1].1.x, slots[0].1.x + CARD_WIDTH);
    }

    #[test]
    fn test_horizontal_scrolls_to_cursor() {
        let theme = Theme::default();
        let content = content(6, LayoutHint::Horizontal, &FavoritesSet::default());
        let area = Rect::new(0, 0, 2 * CARD_WIDTH + 2, CARD_HEIGHT + 2);
        let grid = CardGrid::new(ContainerId::Trending, Some(&content), &theme).cursor(4, true);

        let indices: Vec<usize> = grid.slots(area).into_iter().map(|(i, _)| i).collect();

        assert_eq!(indices, vec![3, 4]);
    }

    #[test]
    fn test_placeholder_text_rendered() {
        let theme = Theme::default();
        let content = ContainerContent::Placeholder(Placeholder::NoFavorites);
        let area = Rect::new(0, 0, 100, 5);
        let mut buf = Buffer::empty(area);

        CardGrid::new(ContainerId::Favorites, Some(&content), &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Your Favorites"));
        assert!(text.contains("You haven't saved any favorites yet"));
    }

    #[test]
    fn test_heart_reflects_favorite() {
        let theme = Theme::default();
        let content = content(2, LayoutHint::Grid, &FavoritesSet::from_ids(["1"]));
        let area = Rect::new(0, 0, 2 * CARD_WIDTH + 2, CARD_HEIGHT + 2);
        let grid = CardGrid::new(ContainerId::Home, Some(&content), &theme);
        let slots = grid.slots(area);
        let mut buf = Buffer::empty(area);

        grid.render(area, &mut buf);

        let first = heart_area(slots[0].1);
        let second = heart_area(slots[1].1);
        assert_eq!(buf[(first.x, first.y)].symbol(), "♡");
        assert_eq!(buf[(second.x, second.y)].symbol(), "♥");
    }

    #[test]
    fn test_card_shows_name_and_meta() {
        let theme = Theme::default();
        let content = content(1, LayoutHint::Grid, &FavoritesSet::default());
        let area = Rect::new(0, 0, CARD_WIDTH + 2, CARD_HEIGHT + 2);
        let mut buf = Buffer::empty(area);

        CardGrid::new(ContainerId::Home, Some(&content), &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Dish 0"));
        assert!(text.contains("Unknown Category, Unknown Area"));
    }
}
