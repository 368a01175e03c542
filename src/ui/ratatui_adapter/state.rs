//! Screen state for the recipe browser
//!
//! [`BrowserState`] is the terminal's [`Presenter`]: the controller writes
//! view, container and modal content into it, and the event loop reads it
//! back to draw. Purely local concerns (query editing, focus, card cursors,
//! status messages, mouse hit areas) live here too and never reach the
//! controller.

use crate::render::{Card, ContainerContent, ContainerId};
use crate::ui::output::MessageLevel;
use crate::ui::traits::Presenter;
use crate::ui::types::ModalContent;
use crate::view::View;
use ratatui::layout::{Position, Rect};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Typing goes into the query
    #[default]
    Search,
    /// Arrow keys move between cards of the focused container
    Cards,
}

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
    pub created_at: Instant,
}

impl StatusMessage {
    #[must_use]
    pub fn new(level: MessageLevel, text: String) -> Self {
        Self {
            level,
            text,
            created_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Screen area of one drawn card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHit {
    pub container: ContainerId,
    pub index: usize,
    pub id: String,
    pub area: Rect,
    pub heart: Rect,
}

/// Clickable regions recorded during the last draw
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub tabs: Vec<(View, Rect)>,
    pub search: Rect,
    pub cards: Vec<CardHit>,
    /// Cards per row for each grid container
    pub columns: HashMap<ContainerId, usize>,
    pub modal: Option<Rect>,
    pub close_button: Option<Rect>,
}

/// What a mouse click landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Tab(View),
    Search,
    Card { container: ContainerId, index: usize, id: String },
    Heart { container: ContainerId, index: usize, id: String },
    CloseButton,
    ModalBody,
    Backdrop,
    Nothing,
}

impl HitMap {
    /// Resolve a click at `(column, row)`
    ///
    /// While the modal is open only the modal and its backdrop are live.
    #[must_use]
    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let pos = Position::new(column, row);

        if let Some(modal) = self.modal {
            if self.close_button.is_some_and(|r| r.contains(pos)) {
                return Hit::CloseButton;
            }
            return if modal.contains(pos) {
                Hit::ModalBody
            } else {
                Hit::Backdrop
            };
        }

        if let Some((view, _)) = self.tabs.iter().find(|(_, r)| r.contains(pos)) {
            return Hit::Tab(*view);
        }
        if self.search.contains(pos) {
            return Hit::Search;
        }
        for card in &self.cards {
            if card.heart.contains(pos) {
                return Hit::Heart {
                    container: card.container,
                    index: card.index,
                    id: card.id.clone(),
                };
            }
            if card.area.contains(pos) {
                return Hit::Card {
                    container: card.container,
                    index: card.index,
                    id: card.id.clone(),
                };
            }
        }
        Hit::Nothing
    }
}

/// Everything the browser draws
#[derive(Debug)]
pub struct BrowserState {
    pub view: View,
    pub containers: HashMap<ContainerId, ContainerContent>,
    pub modal: ModalContent,
    pub modal_scroll: u16,
    pub query: String,
    /// Byte offset of the cursor within `query`
    pub query_cursor: usize,
    pub focus: Focus,
    /// Container that owns the card cursor
    pub focused: ContainerId,
    pub cursors: HashMap<ContainerId, usize>,
    pub messages: Vec<StatusMessage>,
    pub message_ttl: Duration,
    pub hits: HitMap,
    /// Saved favorites, as last reported by the controller
    pub favorite_count: usize,
    pub should_exit: bool,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: View::Home,
            containers: HashMap::new(),
            modal: ModalContent::Closed,
            modal_scroll: 0,
            query: String::new(),
            query_cursor: 0,
            focus: Focus::Search,
            focused: ContainerId::Home,
            cursors: HashMap::new(),
            messages: Vec::new(),
            message_ttl: Duration::from_secs(5),
            hits: HitMap::default(),
            favorite_count: 0,
            should_exit: false,
        }
    }

    #[must_use]
    pub fn content(&self, container: ContainerId) -> Option<&ContainerContent> {
        self.containers.get(&container)
    }

    #[must_use]
    pub fn cursor(&self, container: ContainerId) -> usize {
        self.cursors.get(&container).copied().unwrap_or(0)
    }

    fn card_count(&self, container: ContainerId) -> usize {
        self.content(container).map_or(0, |c| c.cards().len())
    }

    /// Card under the cursor of the focused container
    #[must_use]
    pub fn focused_card(&self) -> Option<&Card> {
        self.content(self.focused)?
            .cards()
            .get(self.cursor(self.focused))
    }

    /// Put the card cursor on `index` of `container`
    pub fn select_card(&mut self, container: ContainerId, index: usize) {
        self.focused = container;
        self.focus = Focus::Cards;
        self.cursors.insert(container, index);
        self.clamp_cursor(container);
    }

    fn clamp_cursor(&mut self, container: ContainerId) {
        let count = self.card_count(container);
        let cursor = self.cursors.entry(container).or_insert(0);
        *cursor = (*cursor).min(count.saturating_sub(1));
    }

    /// Move the card cursor by `delta` cards
    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.card_count(self.focused);
        if count == 0 {
            return;
        }
        let current = self.cursor(self.focused);
        let next = current.saturating_add_signed(delta).min(count - 1);
        self.cursors.insert(self.focused, next);
    }

    /// Move the card cursor by one row of the focused container
    pub fn move_row(&mut self, down: bool) {
        let columns = self.hits.columns.get(&self.focused).copied().unwrap_or(1);
        let columns = isize::try_from(columns.max(1)).unwrap_or(1);
        self.move_cursor(if down { columns } else { -columns });
    }

    /// Cycle focus: search, then each container of the active view
    pub fn cycle_focus(&mut self) {
        let containers = self.view.containers();
        match self.focus {
            Focus::Search => {
                self.focus = Focus::Cards;
                self.focused = containers[0];
            }
            Focus::Cards => {
                let pos = containers.iter().position(|c| *c == self.focused);
                match pos.map(|p| p + 1) {
                    Some(next) if next < containers.len() => self.focused = containers[next],
                    _ => self.focus = Focus::Search,
                }
            }
        }
    }

    pub fn query_push(&mut self, c: char) {
        self.query.insert(self.query_cursor, c);
        self.query_cursor += c.len_utf8();
    }

    pub fn query_backspace(&mut self) {
        if let Some((idx, _)) = self.query[..self.query_cursor].char_indices().next_back() {
            self.query.remove(idx);
            self.query_cursor = idx;
        }
    }

    pub fn query_cursor_left(&mut self) {
        if let Some((idx, _)) = self.query[..self.query_cursor].char_indices().next_back() {
            self.query_cursor = idx;
        }
    }

    pub fn query_cursor_right(&mut self) {
        if let Some(c) = self.query[self.query_cursor..].chars().next() {
            self.query_cursor += c.len_utf8();
        }
    }

    pub fn add_message(&mut self, level: MessageLevel, text: String) {
        self.messages.push(StatusMessage::new(level, text));
    }

    /// Non-expired messages
    #[must_use]
    pub fn active_messages(&self) -> Vec<&StatusMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_expired(self.message_ttl))
            .collect()
    }

    pub fn cleanup_messages(&mut self) {
        let ttl = self.message_ttl;
        self.messages.retain(|m| !m.is_expired(ttl));
    }

    /// Video link of the recipe shown in the modal
    #[must_use]
    pub fn modal_video(&self) -> Option<&str> {
        match &self.modal {
            ModalContent::Detail(view) => view.video.as_deref(),
            _ => None,
        }
    }

    /// Source link of the recipe shown in the modal
    #[must_use]
    pub fn modal_source(&self) -> Option<&str> {
        match &self.modal {
            ModalContent::Detail(view) => view.source.as_deref(),
            _ => None,
        }
    }
}

impl Presenter for BrowserState {
    fn show_view(&mut self, view: View) {
        self.view = view;
        if !view.containers().contains(&self.focused) {
            self.focused = view.containers()[0];
        }
    }

    fn render_container(&mut self, container: ContainerId, content: ContainerContent) {
        self.containers.insert(container, content);
        self.clamp_cursor(container);
    }

    fn render_modal(&mut self, modal: ModalContent) {
        self.modal = modal;
        self.modal_scroll = 0;
    }

    fn mark_favorite(&mut self, id: &str, active: bool) {
        for content in self.containers.values_mut() {
            content.mark_favorite(id, active);
        }
    }

    fn clear_query(&mut self) {
        self.query.clear();
        self.query_cursor = 0;
    }

    fn show_favorite_count(&mut self, count: usize) {
        self.favorite_count = count;
    }

    fn notify(&mut self, level: MessageLevel, message: &str) {
        self.add_message(level, message.to_string());
    }
}
