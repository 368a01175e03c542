//! Ratatui-based recipe browser
//!
//! The terminal implementation of the [`Presenter`](crate::ui::Presenter)
//! port. [`BrowserState`] receives render calls from the controller;
//! [`RecipeBrowser`] owns the terminal and runs the event loop.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           RecipeBrowser                     │
//! │  (terminal setup, event loop)               │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌───────────┐
//! │ AppControl │ │  Ratatui  │ │ Crossterm │
//! │  (intents) │ │ (widgets) │ │  (events) │
//! └────────────┘ └───────────┘ └───────────┘
//! ```
//!
//! # Keys
//!
//! - **F1/F2/F3** switch between Home, Explore and Favorites
//! - **Tab** moves focus from the search bar through the card containers
//! - **Enter** searches, or opens details for the card under the cursor
//! - **f** toggles the heart of the card under the cursor
//! - **Esc** closes the modal; clicking the backdrop or `[x]` does too
//! - **v** / **s** open the video or source link of the open recipe

mod browser;
mod events;
mod state;
mod theme;
pub mod widgets;

pub use browser::{RecipeBrowser, draw};
pub use events::{EventResult, handle_key, handle_mouse};
pub use state::{BrowserState, Focus, HitMap};
pub use theme::Theme;
