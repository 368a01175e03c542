//! Pure renderers from recipe records to displayable values
//!
//! Nothing here touches the terminal. The renderers produce structured
//! values ([`ContainerContent`], [`DetailView`]) that a presenter draws, so
//! card and modal content can be tested without any UI.

use crate::favorites::FavoritesSet;
use crate::models::RecipeSummary;
use std::fmt;

mod detail;

pub use detail::{DetailView, IngredientLine, render_detail, split_paragraphs};

/// Fallback shown when a record has no category
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";
/// Fallback shown when a record has no area
pub const UNKNOWN_AREA: &str = "Unknown Area";

/// A region of the screen that holds recipe cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerId {
    /// Search results
    Home,
    /// First explore strip
    Recommended,
    /// Second explore strip
    Trending,
    /// Saved recipes
    Favorites,
}

impl ContainerId {
    pub const ALL: [Self; 4] = [Self::Home, Self::Recommended, Self::Trending, Self::Favorites];

    /// Layout used for cards in this container
    #[must_use]
    pub const fn layout(self) -> LayoutHint {
        match self {
            Self::Home | Self::Favorites => LayoutHint::Grid,
            Self::Recommended | Self::Trending => LayoutHint::Horizontal,
        }
    }

    /// Heading shown above the container
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Search Results",
            Self::Recommended => "Recommended",
            Self::Trending => "Trending",
            Self::Favorites => "Your Favorites",
        }
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// How a card list is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutHint {
    /// Wrapping rows of cards
    Grid,
    /// Single scrolling strip
    Horizontal,
}

/// Informational text shown instead of cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Home before the first search
    Welcome,
    /// A request is in flight
    Loading,
    /// The request succeeded with zero matches
    NoResults,
    /// The favorites set is empty
    NoFavorites,
    /// The request failed
    Failed,
}

impl Placeholder {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Welcome => "Search for a recipe to get started.",
            Self::Loading => "Loading recipes...",
            Self::NoResults => "No recipes found. Try a different ingredient!",
            Self::NoFavorites => {
                "You haven't saved any favorites yet. Tap the heart on a recipe to keep it here."
            }
            Self::Failed => {
                "An error occurred while fetching recipes. Please check your network."
            }
        }
    }

    /// Placeholder for an empty list in `container`
    #[must_use]
    pub const fn empty_for(container: ContainerId) -> Self {
        match container {
            ContainerId::Favorites => Self::NoFavorites,
            _ => Self::NoResults,
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// One rendered recipe card
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Recipe id; keys both the details and favorite affordances
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    /// "Category, Area" with fallbacks
    pub meta: String,
    /// Decorative preparation time
    pub prep_minutes: u32,
    /// Decorative rating, 3.5 to 5.0
    pub rating: f32,
    /// Whether the heart is drawn active
    pub favorite: bool,
}

impl Card {
    fn from_summary(recipe: &RecipeSummary, favorites: &FavoritesSet) -> Self {
        let (prep_minutes, rating) = decorations(&recipe.id);
        Self {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            thumbnail: recipe.thumbnail.clone(),
            meta: meta_line(recipe),
            prep_minutes,
            rating,
            favorite: favorites.contains(&recipe.id),
        }
    }
}

/// What a container currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerContent {
    Cards { layout: LayoutHint, cards: Vec<Card> },
    Placeholder(Placeholder),
}

impl ContainerContent {
    /// Cards, or an empty slice for placeholders
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match self {
            Self::Cards { cards, .. } => cards,
            Self::Placeholder(_) => &[],
        }
    }

    #[must_use]
    pub const fn placeholder(&self) -> Option<Placeholder> {
        match self {
            Self::Placeholder(p) => Some(*p),
            Self::Cards { .. } => None,
        }
    }

    /// Set the heart of every card with `id`; returns how many changed
    pub fn mark_favorite(&mut self, id: &str, active: bool) -> usize {
        match self {
            Self::Cards { cards, .. } => {
                let mut changed = 0;
                for card in cards
                    .iter_mut()
                    .filter(|card| card.id == id && card.favorite != active)
                {
                    card.favorite = active;
                    changed += 1;
                }
                changed
            }
            Self::Placeholder(_) => 0,
        }
    }
}

/// "Category, Area" with fallbacks for missing parts
#[must_use]
pub fn meta_line(recipe: &RecipeSummary) -> String {
    format!(
        "{}, {}",
        recipe.category.as_deref().unwrap_or(UNKNOWN_CATEGORY),
        recipe.area.as_deref().unwrap_or(UNKNOWN_AREA)
    )
}

/// Deterministic preparation time and rating derived from an id
///
/// Purely cosmetic; FNV-1a keeps them stable across runs.
#[must_use]
pub fn decorations(id: &str) -> (u32, f32) {
    let hash = id.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |acc, b| {
        (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    });
    // 15..=60 minutes in steps of 5
    let minutes = 15 + 5 * (hash % 10) as u32;
    // 3.5..=5.0 in steps of 0.1
    let tenths = 35 + ((hash >> 16) % 16) as u32;
    #[allow(clippy::cast_precision_loss)]
    let rating = tenths as f32 / 10.0;
    (minutes, rating)
}

/// Render a list of recipes into the content of `container`
///
/// Empty input becomes a placeholder whose text depends on the container.
#[must_use]
pub fn render_cards(
    recipes: &[RecipeSummary],
    favorites: &FavoritesSet,
    layout: LayoutHint,
    container: ContainerId,
) -> ContainerContent {
    if recipes.is_empty() {
        return ContainerContent::Placeholder(Placeholder::empty_for(container));
    }

    ContainerContent::Cards {
        layout,
        cards: recipes
            .iter()
            .map(|recipe| Card::from_summary(recipe, favorites))
            .collect(),
    }
}
