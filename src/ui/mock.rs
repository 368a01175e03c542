//! Recording presenter for testing

use super::output::MessageLevel;
use super::traits::Presenter;
use super::types::ModalContent;
use crate::render::{ContainerContent, ContainerId};
use crate::view::View;
use std::collections::HashMap;

/// Presenter that keeps the latest state of every output
///
/// Useful for driving controllers without a terminal.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub view: Option<View>,
    pub containers: HashMap<ContainerId, ContainerContent>,
    /// Every content written, in order, per container
    pub history: Vec<(ContainerId, ContainerContent)>,
    pub modal: ModalContent,
    pub query_clears: usize,
    /// Every favorites count reported, in order
    pub favorite_counts: Vec<usize>,
    pub notices: Vec<(MessageLevel, String)>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content of `container`
    #[must_use]
    pub fn container(&self, container: ContainerId) -> Option<&ContainerContent> {
        self.containers.get(&container)
    }
}

impl Presenter for RecordingPresenter {
    fn show_view(&mut self, view: View) {
        self.view = Some(view);
    }

    fn render_container(&mut self, container: ContainerId, content: ContainerContent) {
        self.history.push((container, content.clone()));
        self.containers.insert(container, content);
    }

    fn render_modal(&mut self, modal: ModalContent) {
        self.modal = modal;
    }

    fn mark_favorite(&mut self, id: &str, active: bool) {
        for content in self.containers.values_mut() {
            content.mark_favorite(id, active);
        }
    }

    fn show_favorite_count(&mut self, count: usize) {
        self.favorite_counts.push(count);
    }

    fn clear_query(&mut self) {
        self.query_clears += 1;
    }

    fn notify(&mut self, level: MessageLevel, message: &str) {
        self.notices.push((level, message.to_string()));
    }
}
