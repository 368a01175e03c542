//! Recipebox CLI application entry point
//!
//! Opens the interactive recipe browser by default; the subcommands expose
//! the same search, detail and favorites operations for scripting.
//!
//! # Usage
//!
//! ```bash
//! # Browse interactively (default command)
//! recipebox
//!
//! # Search and print matching recipes
//! recipebox search arrabiata
//!
//! # Print one recipe in full
//! recipebox show 52771
//!
//! # Manage favorites
//! recipebox favorites
//! recipebox favorites toggle 52771
//!
//! # Quiet mode (only output ids)
//! recipebox -q search chicken
//! ```
//!
//! # Configuration
//!
//! Settings live in the user's config directory
//! (`~/.config/recipebox/config.toml` on Linux) and can be overridden with
//! `RECIPEBOX_*` environment variables.

use recipebox::{
    RecipeboxError,
    api::{MealDbClient, RecipeError, RecipeSource},
    app::{AppContext, PoolRunner},
    cli::{Cli, Commands, ConfigCommands, FavoritesCommands, generate_completions, parse_setting},
    config::{self, RecipeboxConfig},
    db::Database,
    favorites::FavoritesStore,
    logging::{self, LogTarget},
    output,
    render::{ContainerId, LayoutHint, render_cards, render_detail},
    ui::{OutputWriter, StdoutWriter, ratatui_adapter::RecipeBrowser},
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

type Result<T> = std::result::Result<T, RecipeboxError>;

/// Prompt user for yes/no confirmation
///
/// # Errors
/// Returns `RecipeboxError` if I/O operations fail.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/n]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let response = input.trim().to_lowercase();

    Ok(matches!(response.as_str(), "y" | "yes"))
}

fn open_favorites(config: &RecipeboxConfig, store: Option<PathBuf>) -> Result<FavoritesStore> {
    let path = match store {
        Some(path) => path,
        None => config.store_path()?,
    };
    info!(path = %path.display(), "opening favorites store");
    let db = Database::open(&path)?;
    Ok(FavoritesStore::new(Arc::new(db)))
}

fn recipe_source(config: &RecipeboxConfig) -> Result<Arc<dyn RecipeSource>> {
    Ok(Arc::new(MealDbClient::new(config.api_settings())?))
}

/// Handle the browse command - run the interactive browser
///
/// # Errors
///
/// Returns `RecipeboxError` if the client, the store, or the terminal cannot
/// be set up.
fn handle_browse_command(config: &RecipeboxConfig, favorites: FavoritesStore) -> Result<()> {
    let ctx = AppContext {
        source: recipe_source(config)?,
        favorites,
        runner: Box::new(PoolRunner::with_default_threads()?),
        explore: config.explore_queries(),
    };
    RecipeBrowser::new().run(ctx)?;
    Ok(())
}

/// Handle the search command - print matching recipes as cards
///
/// # Errors
///
/// Returns `RecipeboxError` if the query is blank or the request fails.
fn handle_search_command(
    config: &RecipeboxConfig,
    favorites: &FavoritesStore,
    query: &str,
    out: &StdoutWriter,
) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        return Err(RecipeboxError::InvalidInput("Search text is empty".into()));
    }

    let recipes = recipe_source(config)?.search(query)?;
    if recipes.is_empty() {
        out.info(&format!("No recipes found for '{query}'. Try a different ingredient!"));
        return Ok(());
    }

    let content = render_cards(
        &recipes,
        &favorites.get_all(),
        LayoutHint::Grid,
        ContainerId::Home,
    );
    out.info(&format!("Found {} recipe(s) for '{query}':", recipes.len()));
    out.write(&output::card_list(content.cards(), out.is_quiet()));
    Ok(())
}

/// Handle the show command - print one recipe in full
///
/// # Errors
///
/// Returns `RecipeboxError` if the recipe does not exist or the request fails.
fn handle_show_command(
    config: &RecipeboxConfig,
    favorites: &FavoritesStore,
    id: &str,
    out: &StdoutWriter,
) -> Result<()> {
    let recipe = recipe_source(config)?.lookup(id.trim())?;
    let view = render_detail(&recipe);
    out.write(&output::detail(&view, favorites.contains(&view.id)));
    Ok(())
}

/// Handle the favorites command - list, toggle or clear favorites
///
/// # Errors
///
/// Returns `RecipeboxError` if storage fails or listing cannot reach the
/// recipe service.
fn handle_favorites_command(
    config: &RecipeboxConfig,
    favorites: &FavoritesStore,
    command: &FavoritesCommands,
    out: &StdoutWriter,
) -> Result<()> {
    match command {
        FavoritesCommands::List => {
            let set = favorites.get_all();
            if set.is_empty() {
                out.info("You haven't saved any favorites yet.");
                return Ok(());
            }

            let found = recipe_source(config)?.lookup_many(set.ids());
            let summaries: Vec<_> = found.into_iter().map(|r| r.into_summary()).collect();
            if summaries.len() < set.len() {
                out.warning(&format!(
                    "{} of {} favorites could not be loaded",
                    set.len() - summaries.len(),
                    set.len()
                ));
            }
            let content = render_cards(&summaries, &set, LayoutHint::Grid, ContainerId::Favorites);
            out.write(&output::card_list(content.cards(), out.is_quiet()));
        }
        FavoritesCommands::Toggle { id } => {
            let id = id.trim();
            if id.is_empty() {
                return Err(RecipeboxError::InvalidInput("Recipe id is empty".into()));
            }
            let before = favorites.contains(id);
            let after = favorites.toggle(id);
            if before == after {
                return Err(RecipeboxError::InvalidInput(format!(
                    "Could not update favorites for recipe {id}"
                )));
            }
            if after {
                out.success(&format!("Added {id} to favorites"));
            } else {
                out.success(&format!("Removed {id} from favorites"));
            }
        }
        FavoritesCommands::Clear { force } => {
            let count = favorites.get_all().len();
            if count == 0 {
                out.info("No favorites to clear.");
                return Ok(());
            }
            if !*force && !out.is_quiet() && !confirm(&format!("Remove all {count} favorites?"))? {
                out.info("Cancelled.");
                return Ok(());
            }
            favorites.clear()?;
            out.success(&format!("Removed {count} favorite(s)"));
        }
    }
    Ok(())
}

/// Handle the config command - manage application settings
///
/// `show` and `get` report the effective values; `set` edits the config file
/// alone, so environment overrides are never written back.
///
/// # Errors
///
/// Returns `RecipeboxError` if the key is unknown, the value is invalid, or
/// the configuration cannot be saved.
fn handle_config_command(
    config: &RecipeboxConfig,
    command: &ConfigCommands,
    out: &StdoutWriter,
) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            out.write(&RecipeboxConfig::config_path()?.display().to_string());
        }
        ConfigCommands::Show => {
            out.write(config.to_toml()?.trim_end());
        }
        ConfigCommands::Get { key } => {
            out.write(&config.get(key.trim()).map_err(|_| unknown_key(key))?);
        }
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting).ok_or_else(|| {
                RecipeboxError::InvalidInput("Invalid format. Use: recipebox config set key=value".into())
            })?;
            RecipeboxConfig::set_stored(key, value).map_err(|e| match e {
                ::config::ConfigError::NotFound(_) => unknown_key(key),
                other => RecipeboxError::ConfigError(other),
            })?;
            out.success(&format!("Set {key} = {value}"));
        }
    }
    Ok(())
}

fn unknown_key(key: &str) -> RecipeboxError {
    RecipeboxError::InvalidInput(format!(
        "Unknown configuration key: '{key}'. Available keys: {}",
        config::KEYS.join(", ")
    ))
}

fn run(cli: &Cli, config: RecipeboxConfig) -> Result<()> {
    let out = StdoutWriter::new(cli.quiet || config.quiet);
    let command = cli.get_command();

    let target = if command == Commands::Browse {
        LogTarget::File(config.log_file()?)
    } else {
        LogTarget::Stderr
    };
    logging::init(&config.log.level, &target)?;

    match &command {
        Commands::Browse => {
            let favorites = open_favorites(&config, cli.store.clone())?;
            handle_browse_command(&config, favorites)
        }
        Commands::Search { .. } => {
            let favorites = open_favorites(&config, cli.store.clone())?;
            let query = command.search_text().unwrap_or_default();
            handle_search_command(&config, &favorites, &query, &out)
        }
        Commands::Show { id } => {
            let favorites = open_favorites(&config, cli.store.clone())?;
            handle_show_command(&config, &favorites, id, &out)
        }
        Commands::Favorites { command } => {
            let favorites = open_favorites(&config, cli.store.clone())?;
            let command = command.clone().unwrap_or(FavoritesCommands::List);
            handle_favorites_command(&config, &favorites, &command, &out)
        }
        Commands::Config { command } => handle_config_command(&config, command, &out),
        Commands::Completions { shell } => {
            generate_completions(*shell, &mut io::stdout());
            Ok(())
        }
    }
}

/// Main entry point for the recipebox application
///
/// Loads configuration, parses command-line arguments, and dispatches to the
/// appropriate command handler.
fn main() {
    let cli = Cli::parse_args();

    let result = RecipeboxConfig::load()
        .map_err(RecipeboxError::from)
        .and_then(|config| run(&cli, config));

    if let Err(e) = result {
        let out = StdoutWriter::new(cli.quiet);
        match &e {
            RecipeboxError::ApiError(RecipeError::NotFound(id)) => {
                out.error(&format!("No recipe with id {id}"));
            }
            _ => out.error(&e.to_string()),
        }
        std::process::exit(1);
    }
}
