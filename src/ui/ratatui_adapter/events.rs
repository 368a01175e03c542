//! Event handling for the recipe browser
//!
//! Handles keyboard and mouse events. Local concerns (typing, focus, cursor
//! movement, modal scrolling) are applied to the state directly; anything
//! the controller must act on comes back as an [`EventResult`].

use super::state::{BrowserState, Focus, Hit};
use crate::render::ContainerId;
use crate::ui::types::{CardAction, CloseTrigger};
use crate::view::View;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Keep running; state may have changed locally
    Continue,
    /// Search for the query
    Submit(String),
    /// Switch views
    Nav(View),
    /// Act on a card
    Card {
        container: ContainerId,
        id: String,
        action: CardAction,
    },
    /// Dismiss the modal
    CloseModal(CloseTrigger),
    /// Open a link in the system browser
    OpenLink(String),
    /// Leave the browser
    Quit,
    /// No action taken
    Ignored,
}

fn nav_key(code: KeyCode) -> Option<View> {
    match code {
        KeyCode::F(n @ 1..=3) => View::ALL.get(usize::from(n) - 1).copied(),
        _ => None,
    }
}

/// Handle keys while the modal is open
fn handle_modal(state: &mut BrowserState, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => EventResult::CloseModal(CloseTrigger::Escape),
        KeyCode::Up | KeyCode::Char('k') => {
            state.modal_scroll = state.modal_scroll.saturating_sub(1);
            EventResult::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.modal_scroll = state.modal_scroll.saturating_add(1);
            EventResult::Continue
        }
        KeyCode::PageUp => {
            state.modal_scroll = state.modal_scroll.saturating_sub(10);
            EventResult::Continue
        }
        KeyCode::PageDown => {
            state.modal_scroll = state.modal_scroll.saturating_add(10);
            EventResult::Continue
        }
        KeyCode::Char('v') => state
            .modal_video()
            .map_or(EventResult::Ignored, |url| EventResult::OpenLink(url.to_string())),
        KeyCode::Char('s') => state
            .modal_source()
            .map_or(EventResult::Ignored, |url| EventResult::OpenLink(url.to_string())),
        _ => EventResult::Ignored,
    }
}

/// Handle keys while the search input has focus
fn handle_search(state: &mut BrowserState, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => EventResult::Submit(state.query.clone()),
        (KeyCode::Tab | KeyCode::Down, _) => {
            state.cycle_focus();
            EventResult::Continue
        }
        (KeyCode::Esc, _) => {
            state.focus = Focus::Cards;
            EventResult::Continue
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            state.query.clear();
            state.query_cursor = 0;
            EventResult::Continue
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            state.query_push(c);
            EventResult::Continue
        }
        (KeyCode::Backspace, _) => {
            state.query_backspace();
            EventResult::Continue
        }
        (KeyCode::Left, _) => {
            state.query_cursor_left();
            EventResult::Continue
        }
        (KeyCode::Right, _) => {
            state.query_cursor_right();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Handle keys while a card container has focus
fn handle_cards(state: &mut BrowserState, key: KeyEvent) -> EventResult {
    let card_action = |state: &BrowserState, action: CardAction| {
        state
            .focused_card()
            .map_or(EventResult::Ignored, |card| EventResult::Card {
                container: state.focused,
                id: card.id.clone(),
                action,
            })
    };

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => EventResult::Quit,
        KeyCode::Char('/') => {
            state.focus = Focus::Search;
            EventResult::Continue
        }
        KeyCode::Tab => {
            state.cycle_focus();
            EventResult::Continue
        }
        KeyCode::Char(c @ '1'..='3') => {
            let idx = c as usize - '1' as usize;
            EventResult::Nav(View::ALL[idx])
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.move_cursor(-1);
            EventResult::Continue
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.move_cursor(1);
            EventResult::Continue
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_row(false);
            EventResult::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_row(true);
            EventResult::Continue
        }
        KeyCode::Enter => card_action(&*state, CardAction::Details),
        KeyCode::Char('f' | ' ') => card_action(&*state, CardAction::Favorite),
        _ => EventResult::Ignored,
    }
}

/// Map a key press to an intent
pub fn handle_key(state: &mut BrowserState, key: KeyEvent) -> EventResult {
    if key.kind != KeyEventKind::Press {
        return EventResult::Ignored;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return EventResult::Quit;
    }
    if state.modal.is_open() {
        return handle_modal(state, key);
    }
    if let Some(view) = nav_key(key.code) {
        return EventResult::Nav(view);
    }

    match state.focus {
        Focus::Search => handle_search(state, key),
        Focus::Cards => handle_cards(state, key),
    }
}

/// Map a mouse event to an intent using the last draw's hit map
pub fn handle_mouse(state: &mut BrowserState, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {}
        MouseEventKind::ScrollUp if state.modal.is_open() => {
            state.modal_scroll = state.modal_scroll.saturating_sub(1);
            return EventResult::Continue;
        }
        MouseEventKind::ScrollDown if state.modal.is_open() => {
            state.modal_scroll = state.modal_scroll.saturating_add(1);
            return EventResult::Continue;
        }
        _ => return EventResult::Ignored,
    }

    match state.hits.hit(mouse.column, mouse.row) {
        Hit::CloseButton => EventResult::CloseModal(CloseTrigger::CloseButton),
        Hit::Backdrop => EventResult::CloseModal(CloseTrigger::Backdrop),
        Hit::ModalBody | Hit::Nothing => EventResult::Ignored,
        Hit::Tab(view) => EventResult::Nav(view),
        Hit::Search => {
            state.focus = Focus::Search;
            EventResult::Continue
        }
        Hit::Card { container, index, id } => {
            state.select_card(container, index);
            EventResult::Card {
                container,
                id,
                action: CardAction::Details,
            }
        }
        Hit::Heart { container, index, id } => {
            state.select_card(container, index);
            EventResult::Card {
                container,
                id,
                action: CardAction::Favorite,
            }
        }
    }
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(state: &mut BrowserState, timeout: Duration) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) => handle_key(state, key),
        Event::Mouse(mouse) => handle_mouse(state, mouse),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}
