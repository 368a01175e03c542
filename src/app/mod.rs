//! Orchestration of user intents
//!
//! [`AppController`] turns intents from the presentation layer (submit a
//! query, pick a nav entry, act on a card, dismiss the modal) into network
//! jobs and render calls. It owns all mutable UI-side state; network work
//! runs through a [`TaskRunner`] and comes back as [`Completion`]s that
//! [`AppController::pump`] applies on the UI thread.
//!
//! # Example
//!
//! ```no_run
//! use recipebox::api::{ApiSettings, MealDbClient};
//! use recipebox::app::{AppContext, AppController, ExploreQueries, PoolRunner};
//! use recipebox::db::MemoryStore;
//! use recipebox::FavoritesStore;
//! # use recipebox::ui::Presenter;
//! # fn demo<P: Presenter>(presenter: P) -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//!
//! let ctx = AppContext {
//!     source: Arc::new(MealDbClient::new(ApiSettings::default())?),
//!     favorites: FavoritesStore::new(Arc::new(MemoryStore::new())),
//!     runner: Box::new(PoolRunner::with_default_threads()?),
//!     explore: ExploreQueries::default(),
//! };
//! let mut app = AppController::new(ctx, presenter);
//! app.submit_query("arrabiata");
//! // later, on every tick of the event loop
//! app.pump();
//! # Ok(())
//! # }
//! ```

mod runner;


pub use runner::{
    Completion, InlineRunner, Job, NETWORK_THREADS, Outcome, PoolRunner, Target, TaskRunner,
};

use crate::api::{RecipeError, RecipeSource};
use crate::favorites::FavoritesStore;
use crate::models::{RecipeDetail, RecipeSummary};
use crate::render::{
    ContainerContent, ContainerId, LayoutHint, Placeholder, render_cards, render_detail,
};
use crate::ui::{CardAction, CloseTrigger, MessageLevel, ModalContent, Presenter};
use crate::view::{View, ViewController};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, info, warn};

/// Search terms used to fill the explore view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreQueries {
    pub recommended: String,
    pub trending: String,
}

impl Default for ExploreQueries {
    fn default() -> Self {
        Self {
            recommended: "chicken".to_string(),
            trending: "beef".to_string(),
        }
    }
}

/// Collaborators injected into the controller
pub struct AppContext {
    pub source: Arc<dyn RecipeSource>,
    pub favorites: FavoritesStore,
    pub runner: Box<dyn TaskRunner>,
    pub explore: ExploreQueries,
}

/// Wires intents to fetches, storage and rendering
pub struct AppController<P: Presenter> {
    ctx: AppContext,
    presenter: P,
    views: ViewController,
    explore_loaded: bool,
    /// Recipe the open modal is waiting on or showing
    modal_recipe: Option<String>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl<P: Presenter> AppController<P> {
    /// Create a controller and draw the initial Home screen
    pub fn new(ctx: AppContext, mut presenter: P) -> Self {
        let (tx, rx) = mpsc::channel();
        let views = ViewController::new();

        presenter.show_view(views.active());
        presenter.render_container(
            ContainerId::Home,
            ContainerContent::Placeholder(Placeholder::Welcome),
        );
        presenter.render_modal(ModalContent::Closed);
        presenter.show_favorite_count(ctx.favorites.get_all().len());

        Self {
            ctx,
            presenter,
            views,
            explore_loaded: false,
            modal_recipe: None,
            tx,
            rx,
        }
    }

    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub const fn active_view(&self) -> View {
        self.views.active()
    }

    /// Whether the explore view has been populated (or attempted) already
    #[must_use]
    pub const fn explore_loaded(&self) -> bool {
        self.explore_loaded
    }

    /// Whether a detail modal is open
    #[must_use]
    pub const fn modal_open(&self) -> bool {
        self.modal_recipe.is_some()
    }

    /// Search for `text` and show the results on Home
    ///
    /// Blank input is ignored entirely.
    pub fn submit_query(&mut self, text: &str) {
        let query = text.trim();
        if query.is_empty() {
            return;
        }

        self.presenter.clear_query();
        self.activate(View::Home);
        self.search_into(ContainerId::Home, query.to_string());
    }

    /// Switch to `view`, loading whatever it needs
    pub fn select_nav(&mut self, view: View) {
        self.activate(view);

        match view {
            View::Home => {}
            View::Explore => {
                if !self.explore_loaded {
                    self.explore_loaded = true;
                    let queries = self.ctx.explore.clone();
                    self.search_into(ContainerId::Recommended, queries.recommended);
                    self.search_into(ContainerId::Trending, queries.trending);
                }
            }
            View::Favorites => self.refresh_favorites(),
        }
    }

    /// Act on the card for `card_id` shown in `container`
    pub fn handle_card_action(&mut self, container: ContainerId, card_id: &str, action: CardAction) {
        match action {
            CardAction::Details => {
                debug!(%container, id = card_id, "opening details");
                self.modal_recipe = Some(card_id.to_string());
                self.presenter.render_modal(ModalContent::Loading);

                let id = card_id.to_string();
                self.dispatch(Target::Modal, move |source| Outcome::Detail {
                    result: source.lookup(&id),
                    id,
                });
            }
            CardAction::Favorite => {
                let active = self.ctx.favorites.toggle(card_id);
                debug!(%container, id = card_id, active, "favorite toggled");
                self.presenter.mark_favorite(card_id, active);
                self.presenter
                    .show_favorite_count(self.ctx.favorites.get_all().len());
            }
        }
    }

    /// Dismiss the modal; views and containers are left alone
    pub fn close_modal(&mut self, trigger: CloseTrigger) {
        if let Some(id) = self.modal_recipe.take() {
            debug!(id, %trigger, "closing modal");
        }
        self.presenter.render_modal(ModalContent::Closed);
    }

    /// Reload the favorites container from storage
    pub fn refresh_favorites(&mut self) {
        let favorites = self.ctx.favorites.get_all();
        self.presenter.show_favorite_count(favorites.len());
        if favorites.is_empty() {
            self.presenter.render_container(
                ContainerId::Favorites,
                ContainerContent::Placeholder(Placeholder::NoFavorites),
            );
            return;
        }

        self.presenter.render_container(
            ContainerId::Favorites,
            ContainerContent::Placeholder(Placeholder::Loading),
        );
        let ids = favorites.ids().to_vec();
        self.dispatch(Target::Container(ContainerId::Favorites), move |source| {
            Outcome::Favorites {
                requested: ids.len(),
                found: source.lookup_many(&ids),
            }
        });
    }

    /// Apply every settled job; returns how many were applied
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    fn activate(&mut self, view: View) {
        self.views.switch_to(view);
        self.presenter.show_view(view);
    }

    fn search_into(&mut self, container: ContainerId, query: String) {
        info!(%container, query, "searching");
        self.presenter.render_container(
            container,
            ContainerContent::Placeholder(Placeholder::Loading),
        );
        self.dispatch(Target::Container(container), move |source| {
            Outcome::Recipes(source.search(&query))
        });
    }

    fn dispatch<F>(&self, target: Target, work: F)
    where
        F: FnOnce(&dyn RecipeSource) -> Outcome + Send + 'static,
    {
        let source = Arc::clone(&self.ctx.source);
        let tx = self.tx.clone();
        self.ctx.runner.spawn(Box::new(move || {
            let outcome = work(source.as_ref());
            if tx.send(Completion { target, outcome }).is_err() {
                debug!("controller gone, completion dropped");
            }
        }));
    }

    fn apply(&mut self, completion: Completion) {
        match (completion.target, completion.outcome) {
            (Target::Container(container), Outcome::Recipes(result)) => {
                let content = self.recipes_content(container, result);
                self.presenter.render_container(container, content);
            }
            (Target::Container(container), Outcome::Favorites { found, requested }) => {
                let missing = requested.saturating_sub(found.len());
                if missing > 0 {
                    self.presenter.notify(
                        MessageLevel::Warning,
                        &format!("{missing} of {requested} favorites could not be loaded"),
                    );
                }
                let summaries: Vec<RecipeSummary> =
                    found.into_iter().map(RecipeDetail::into_summary).collect();
                let content = self.cards(&summaries, LayoutHint::Grid, container);
                self.presenter.render_container(container, content);
            }
            (Target::Modal, Outcome::Detail { id, result }) => {
                if self.modal_recipe.as_deref() != Some(id.as_str()) {
                    debug!(id, "modal no longer waiting, detail discarded");
                    return;
                }
                self.presenter.render_modal(modal_content(&id, result));
            }
            (target, outcome) => {
                warn!(?target, ?outcome, "completion routed to mismatched target");
            }
        }
    }

    fn recipes_content(
        &self,
        container: ContainerId,
        result: Result<Vec<RecipeSummary>, RecipeError>,
    ) -> ContainerContent {
        match result {
            Ok(recipes) => self.cards(&recipes, container.layout(), container),
            Err(RecipeError::NotFound(_)) => {
                ContainerContent::Placeholder(Placeholder::empty_for(container))
            }
            Err(e) => {
                warn!(%container, error = %e, "fetch failed");
                ContainerContent::Placeholder(Placeholder::Failed)
            }
        }
    }

    /// Cards are marked against storage at render time, not dispatch time
    fn cards(
        &self,
        recipes: &[RecipeSummary],
        layout: LayoutHint,
        container: ContainerId,
    ) -> ContainerContent {
        render_cards(recipes, &self.ctx.favorites.get_all(), layout, container)
    }
}

fn modal_content(id: &str, result: Result<RecipeDetail, RecipeError>) -> ModalContent {
    match result {
        Ok(detail) => ModalContent::Detail(Box::new(render_detail(&detail))),
        Err(RecipeError::NotFound(_)) => {
            ModalContent::Message(format!("Recipe {id} could not be found."))
        }
        Err(e) => {
            warn!(id, error = %e, "detail lookup failed");
            ModalContent::Message(
                "Could not load recipe details. Please check your network.".to_string(),
            )
        }
    }
}
