//! Core trait for the presentation port

use super::output::MessageLevel;
use super::types::ModalContent;
use crate::render::{ContainerContent, ContainerId};
use crate::view::View;

/// Everything the controllers may ask of a presentation layer
///
/// The controllers never read back from the presenter; it is a pure sink.
/// This lets the terminal UI, a headless driver, and test recorders share
/// the same orchestration logic.
pub trait Presenter {
    /// Highlight the nav entry for `view` and make its containers visible
    fn show_view(&mut self, view: View);

    /// Replace the content of one container
    fn render_container(&mut self, container: ContainerId, content: ContainerContent);

    /// Replace the modal state
    fn render_modal(&mut self, modal: ModalContent);

    /// Set the heart state of every card showing `id`
    fn mark_favorite(&mut self, id: &str, active: bool);

    /// Empty the search input
    fn clear_query(&mut self);

    /// Update the number of saved favorites shown alongside the views
    fn show_favorite_count(&mut self, _count: usize) {}

    /// Show a transient, non-blocking notice
    fn notify(&mut self, _level: MessageLevel, _message: &str) {}
}
