//! Top-level view switching
//!
//! Exactly one view is active at a time. The nav highlight and the visible
//! container are both read from the same `active` field, so they cannot
//! disagree.
//!
//! ```text
//!        ┌────────────┐
//!   ┌───►│    Home    │◄───┐
//!   │    └────────────┘    │
//!   ▼                      ▼
//! ┌────────────┐    ┌────────────┐
//! │  Explore   │◄──►│ Favorites  │
//! └────────────┘    └────────────┘
//! ```
//!
//! Every view is reachable from every other in one step.

use crate::render::ContainerId;
use std::fmt;
use tracing::info;

/// A top-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Home,
    Explore,
    Favorites,
}

impl View {
    /// Views in nav order
    pub const ALL: [Self; 3] = [Self::Home, Self::Explore, Self::Favorites];

    /// Position in the nav bar
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::Explore => 1,
            Self::Favorites => 2,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Explore => "Explore",
            Self::Favorites => "Favorites",
        }
    }

    /// Card containers shown while this view is active
    #[must_use]
    pub const fn containers(self) -> &'static [ContainerId] {
        match self {
            Self::Home => &[ContainerId::Home],
            Self::Explore => &[ContainerId::Recommended, ContainerId::Trending],
            Self::Favorites => &[ContainerId::Favorites],
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A completed view switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: View,
    pub to: View,
}

impl Transition {
    /// Whether the switch stayed on the same view
    #[must_use]
    pub fn is_reentry(&self) -> bool {
        self.from == self.to
    }
}

/// Owner of the active view
#[derive(Debug, Default)]
pub struct ViewController {
    active: View,
}

impl ViewController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn active(&self) -> View {
        self.active
    }

    /// Whether `view` is active; answers both "nav highlighted" and
    /// "container visible"
    #[must_use]
    pub fn is_active(&self, view: View) -> bool {
        self.active == view
    }

    /// Deactivate everything and activate exactly `view`
    pub fn switch_to(&mut self, view: View) -> Transition {
        let transition = Transition {
            from: self.active,
            to: view,
        };
        self.active = view;
        if !transition.is_reentry() {
            info!(from = %transition.from, to = %view, "switched view");
        }
        transition
    }
}
