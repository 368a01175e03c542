//! Ratatui widgets for the recipe browser
//!
//! Widgets that own clickable regions expose the layout function they
//! render with, so the event loop can record the same rectangles for
//! mouse hit-testing.

mod card_grid;
mod help_bar;
mod nav_tabs;
mod recipe_modal;
mod search_bar;
mod status_bar;

pub use card_grid::{CARD_HEIGHT, CARD_WIDTH, CardGrid, heart_area};
pub use help_bar::{HelpBar, KeyHint};
pub use nav_tabs::NavTabs;
pub use recipe_modal::RecipeModal;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;

use ratatui::layout::{Constraint, Layout, Rect};

/// Area of `percent_x` by `percent_y` percent centered in `area`
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let x = percent_x.min(100);
    let y = percent_y.min(100);
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - y) / 2),
        Constraint::Percentage(y),
        Constraint::Percentage((100 - y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - x) / 2),
        Constraint::Percentage(x),
        Constraint::Percentage((100 - x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Clamp a count into a terminal dimension
pub(crate) fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
