//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for recipebox using the `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Interactive terminal browser (default)
//! - **search**: Print recipes matching a name
//! - **show**: Print the full details of one recipe
//! - **favorites**: List, toggle, or clear saved favorites
//! - **config**: Inspect and change settings
//! - **completions**: Generate shell completion scripts
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use recipebox::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["recipebox", "search", "spicy", "penne"]);
//! match cli.get_command() {
//!     Commands::Search { query } => assert_eq!(query.join(" "), "spicy penne"),
//!     _ => unreachable!(),
//! }
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recipebox")]
#[command(about = "Browse recipes from TheMealDB and keep your favorites", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Favorites database directory (overrides config)
    #[arg(long = "store", value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive browser (default)
    #[command(visible_alias = "b")]
    Browse,

    /// Search recipes by name
    #[command(visible_alias = "s")]
    Search {
        /// Search text; multiple words are joined with spaces
        #[arg(value_name = "QUERY", required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Show the full details of a recipe
    Show {
        /// Recipe id (e.g., 52771)
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Manage saved favorites
    #[command(visible_alias = "fav")]
    Favorites {
        #[command(subcommand)]
        command: Option<FavoritesCommands>,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Favorites subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FavoritesCommands {
    /// List favorites with their details (default)
    #[command(visible_alias = "ls")]
    List,

    /// Add or remove a recipe id
    Toggle {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Remove every favorite
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the effective configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., explore.trending)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., api.timeout_secs=5)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse)
    }
}

impl Commands {
    /// Search text with words joined by single spaces
    #[must_use]
    pub fn search_text(&self) -> Option<String> {
        match self {
            Self::Search { query } => Some(query.join(" ")),
            _ => None,
        }
    }
}

/// Split `key=value`, trimming both sides
///
/// Returns `None` without an `=` or with an empty key.
#[must_use]
pub fn parse_setting(setting: &str) -> Option<(&str, &str)> {
    let (key, value) = setting.split_once('=')?;
    let key = key.trim();
    (!key.is_empty()).then_some((key, value.trim()))
}

/// Write a completion script for `shell`
pub fn generate_completions<W: Write>(shell: Shell, buf: &mut W) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, buf);
}
