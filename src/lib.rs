//! Recipebox - a terminal recipe browser
//!
//! This library provides the pieces of the recipe browser: a client for the
//! remote recipe service, a locally persisted favorites set, pure renderers
//! that turn recipe records into card lists and detail views, and the
//! controllers that keep every view in sync with asynchronous fetches.

use thiserror::Error;

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod favorites;
pub mod logging;
pub mod models;
pub mod output;
pub mod render;
pub mod ui;
pub mod view;

pub use favorites::{FavoritesSet, FavoritesStore};
pub use models::{Ingredient, RecipeDetail, RecipeSummary};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum RecipeboxError {
    /// Database error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Remote recipe service error
    #[error("Recipe service error: {0}")]
    ApiError(#[from] api::RecipeError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Background worker pool could not be started
    #[error("Thread pool error: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
