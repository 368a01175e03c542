//! HTTP client for TheMealDB

use super::payload::{parse_lookup, parse_search};
use super::{RecipeError, RecipeSource, Result};
use crate::models::{RecipeDetail, RecipeSummary};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Connection settings for the recipe service
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.themealdb.com/api/json/v1/1".to_owned(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// `RecipeSource` backed by TheMealDB's public JSON API
pub struct MealDbClient {
    settings: ApiSettings,
    client: Client,
}

impl MealDbClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::Network` if the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RecipeError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { settings, client })
    }

    /// Full URL of an API endpoint such as `search.php`
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    fn get_text(&self, path: &str, param: (&str, &str)) -> Result<String> {
        let url = self.endpoint(path);
        debug!(%url, key = param.0, value = param.1, "requesting");

        let response = self
            .client
            .get(&url)
            .query(&[param])
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| RecipeError::Network(e.to_string()))?;

        response
            .text()
            .map_err(|e| RecipeError::Network(format!("failed to read response: {e}")))
    }
}

impl RecipeSource for MealDbClient {
    fn search(&self, query: &str) -> Result<Vec<RecipeSummary>> {
        let body = self.get_text("search.php", ("s", query))?;
        let recipes = parse_search(&body)?;
        debug!(query, count = recipes.len(), "search settled");
        Ok(recipes)
    }

    fn lookup(&self, id: &str) -> Result<RecipeDetail> {
        let body = self.get_text("lookup.php", ("i", id))?;
        parse_lookup(&body, id)
    }
}
