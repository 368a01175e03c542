//! Terminal event loop for the recipe browser

use super::events::{EventResult, poll_and_handle};
use super::state::{BrowserState, CardHit, Focus, HitMap};
use super::theme::Theme;
use super::widgets::{
    CARD_HEIGHT, CardGrid, HelpBar, NavTabs, RecipeModal, SearchBar, StatusBar, heart_area,
};
use crate::app::{AppContext, AppController};
use crate::ui::error::{Result, UiError};
use crate::ui::output::MessageLevel;
use crate::ui::traits::Presenter;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
};
use std::io::{self, IsTerminal, Stdout, Write};
use std::panic::{self, PanicHookInfo};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const TICK: Duration = Duration::from_millis(50);

/// Interactive terminal browser
pub struct RecipeBrowser {
    theme: Theme,
}

impl Default for RecipeBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeBrowser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
        }
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        if !io::stdout().is_terminal() {
            return Err(UiError::TerminalError("stdout is not a terminal".into()));
        }
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        enter_screen(&mut stdout, disable_raw_mode)?;
        Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
            if let Err(cleanup) = Self::cleanup_terminal() {
                warn!(error = %cleanup, "terminal cleanup failed");
            }
            e.into()
        })
    }

    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Run until the user quits
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up, drawn to, or polled.
    pub fn run(&self, ctx: AppContext) -> Result<()> {
        let _hook = PanicHookGuard::install();
        let mut terminal = Self::setup_terminal()?;
        info!("browser started");

        let result = self.run_loop(&mut terminal, ctx);

        if let Err(e) = Self::cleanup_terminal() {
            warn!(error = %e, "terminal cleanup failed");
        }
        info!("browser stopped");
        result
    }

    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        ctx: AppContext,
    ) -> Result<()> {
        let mut app = AppController::new(ctx, BrowserState::new());

        loop {
            app.pump();
            app.presenter_mut().cleanup_messages();

            terminal.draw(|frame| draw(frame, app.presenter_mut(), &self.theme))?;

            match poll_and_handle(app.presenter_mut(), TICK)? {
                EventResult::Submit(query) => app.submit_query(&query),
                EventResult::Nav(view) => app.select_nav(view),
                EventResult::Card {
                    container,
                    id,
                    action,
                } => app.handle_card_action(container, &id, action),
                EventResult::CloseModal(trigger) => app.close_modal(trigger),
                EventResult::OpenLink(url) => match open_link(&url) {
                    Ok(()) => app
                        .presenter_mut()
                        .notify(MessageLevel::Info, "Opened link in your browser"),
                    Err(e) => app.presenter_mut().notify(MessageLevel::Error, &e.to_string()),
                },
                EventResult::Quit => break,
                EventResult::Continue | EventResult::Ignored => {}
            }
        }

        Ok(())
    }
}

/// Switch `out` to the alternate screen with mouse capture
///
/// Raw mode is already on when this runs; `restore` turns it back off if
/// the switch fails.
fn enter_screen<W: Write>(out: &mut W, restore: impl FnOnce() -> io::Result<()>) -> Result<()> {
    if let Err(e) = execute!(out, EnterAlternateScreen, EnableMouseCapture) {
        if let Err(restore_err) = restore() {
            warn!(error = %restore_err, "could not leave raw mode");
        }
        return Err(e.into());
    }
    Ok(())
}

type PanicHook = dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static;

/// Restores the terminal before the panic message is printed
///
/// Dropping the guard reinstates the hook that was active before.
struct PanicHookGuard {
    previous: Arc<PanicHook>,
}

impl PanicHookGuard {
    fn install() -> Self {
        let previous: Arc<PanicHook> = Arc::from(panic::take_hook());
        let chained = Arc::clone(&previous);
        panic::set_hook(Box::new(move |info| {
            let _ = RecipeBrowser::cleanup_terminal();
            chained(info);
        }));
        Self { previous }
    }
}

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        // The hook cannot be swapped while unwinding.
        if std::thread::panicking() {
            return;
        }
        let previous = Arc::clone(&self.previous);
        drop(panic::take_hook());
        panic::set_hook(Box::new(move |info| previous(info)));
    }
}

fn open_link(url: &str) -> Result<()> {
    open::that(url).map_err(|e| UiError::OpenLinkError {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Draw one frame and record the clickable regions
pub fn draw(frame: &mut Frame, state: &mut BrowserState, theme: &Theme) {
    let area = frame.area();
    let modal_open = state.modal.is_open();

    let [nav, search, body, status, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(CARD_HEIGHT + 2),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let mut hits = HitMap {
        tabs: NavTabs::tab_areas(nav),
        search,
        ..HitMap::default()
    };

    frame.render_widget(NavTabs::new(state.view, theme), nav);
    frame.render_widget(
        SearchBar::new(&state.query, state.query_cursor, theme)
            .focused(state.focus == Focus::Search && !modal_open),
        search,
    );

    let containers = state.view.containers();
    let regions = Layout::vertical(containers.iter().map(|_| Constraint::Fill(1))).split(body);
    for (&container, &region) in containers.iter().zip(regions.iter()) {
        let focused = state.focus == Focus::Cards && state.focused == container && !modal_open;
        let content = state.content(container);
        let grid = CardGrid::new(container, content, theme).cursor(state.cursor(container), focused);

        hits.columns.insert(container, grid.columns(region));
        let cards = content.map(|c| c.cards()).unwrap_or_default();
        for (index, slot) in grid.slots(region) {
            hits.cards.push(CardHit {
                container,
                index,
                id: cards[index].id.clone(),
                area: slot,
                heart: heart_area(slot),
            });
        }
        frame.render_widget(grid, region);
    }

    let messages = state.active_messages();
    frame.render_widget(
        StatusBar::new(&messages, theme, state.view).with_favorites(state.favorite_count),
        status,
    );

    let hints = HelpBar::hints_for(state.focus, modal_open);
    frame.render_widget(HelpBar::new(&hints, theme), help);

    if modal_open {
        let popup = RecipeModal::popup_area(area);
        hits.modal = Some(popup);
        hits.close_button = Some(RecipeModal::close_button_area(popup));
        frame.render_widget(
            RecipeModal::new(&state.modal, theme).scroll(state.modal_scroll),
            area,
        );
    }

    state.hits = hits;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavoritesSet;
    use crate::models::RecipeSummary;
    use crate::render::{ContainerContent, ContainerId, LayoutHint, Placeholder, render_cards};
    use crate::ui::types::ModalContent;
    use crate::view::View;
    use ratatui::backend::TestBackend;

    fn draw_once(state: &mut BrowserState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let theme = Theme::default();
        terminal.draw(|frame| draw(frame, state, &theme)).unwrap();
        terminal
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    struct ClosedWriter;

    impl Write for ClosedWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_failed_screen_switch_leaves_raw_mode() {
        let mut restored = false;
        let result = enter_screen(&mut ClosedWriter, || {
            restored = true;
            Ok(())
        });

        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn test_screen_switch_keeps_raw_mode_on_success() {
        let mut out = Vec::new();
        let mut restored = false;
        enter_screen(&mut out, || {
            restored = true;
            Ok(())
        })
        .unwrap();

        assert!(!restored);
        assert!(!out.is_empty());
    }

    #[test]
    fn test_draw_records_card_hits() {
        let mut state = BrowserState::new();
        let recipes: Vec<RecipeSummary> = (0..3)
            .map(|i| RecipeSummary::new(i.to_string(), format!("Dish {i}"), ""))
            .collect();
        state.render_container(
            ContainerId::Home,
            render_cards(&recipes, &FavoritesSet::default(), LayoutHint::Grid, ContainerId::Home),
        );

        draw_once(&mut state);

        assert_eq!(state.hits.cards.len(), 3);
        assert_eq!(state.hits.tabs.len(), 3);
        assert!(state.hits.modal.is_none());
        assert_eq!(state.hits.columns.get(&ContainerId::Home), Some(&3));
    }

    #[test]
    fn test_explore_shows_both_strips() {
        let mut state = BrowserState::new();
        state.show_view(View::Explore);
        for container in [ContainerId::Recommended, ContainerId::Trending] {
            state.render_container(container, ContainerContent::Placeholder(Placeholder::Loading));
        }

        let terminal = draw_once(&mut state);

        let text = screen_text(&terminal);
        assert!(text.contains("Recommended"));
        assert!(text.contains("Trending"));
        assert!(!text.contains("Search Results"));
    }

    #[test]
    fn test_status_bar_uses_reported_favorite_count() {
        let mut state = BrowserState::new();
        state.show_favorite_count(4);

        let terminal = draw_once(&mut state);

        assert!(screen_text(&terminal).contains("♥ 4"));
    }

    #[test]
    fn test_open_modal_records_backdrop() {
        let mut state = BrowserState::new();
        state.render_modal(ModalContent::Loading);

        let terminal = draw_once(&mut state);

        assert!(state.hits.modal.is_some());
        assert!(state.hits.close_button.is_some());
        assert!(screen_text(&terminal).contains("Loading recipe..."));
    }
}
