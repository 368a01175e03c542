//! Common types for the presentation port

use crate::render::DetailView;
use std::fmt;

/// What the detail modal shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalContent {
    /// Modal hidden
    #[default]
    Closed,
    /// Detail request in flight
    Loading,
    /// Informational text, e.g. after a failed lookup
    Message(String),
    /// A rendered recipe
    Detail(Box<DetailView>),
}

impl ModalContent {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Id of the recipe on display, if any
    #[must_use]
    pub fn recipe_id(&self) -> Option<&str> {
        match self {
            Self::Detail(view) => Some(&view.id),
            _ => None,
        }
    }
}

/// Ways the modal can be dismissed; all have the same effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    /// The modal's close button
    CloseButton,
    /// A click on the backdrop outside the modal content
    Backdrop,
    /// The escape key
    Escape,
}

impl fmt::Display for CloseTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CloseButton => "close button",
            Self::Backdrop => "backdrop",
            Self::Escape => "escape",
        })
    }
}

/// Affordances on a recipe card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Open the detail modal
    Details,
    /// Toggle the heart
    Favorite,
}
