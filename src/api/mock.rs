//! Mock recipe source for testing

use super::{RecipeError, RecipeSource, Result};
use crate::models::{RecipeDetail, RecipeSummary};
use std::collections::HashSet;
use std::sync::Mutex;

/// A call observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Search(String),
    Lookup(String),
}

/// In-memory recipe source with canned records
///
/// Searches match names case-insensitively. Every call is recorded so tests
/// can count network traffic.
#[derive(Debug, Default)]
pub struct MockSource {
    recipes: Vec<RecipeDetail>,
    failing: HashSet<String>,
    offline: bool,
    calls: Mutex<Vec<ApiCall>>,
}

impl MockSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a detail record with a single ingredient
    #[must_use]
    pub fn detail(id: &str, name: &str) -> RecipeDetail {
        let summary = RecipeSummary::new(id, name, format!("https://img.example/{id}.jpg"))
            .with_category("Test")
            .with_area("Nowhere");
        let mut detail = RecipeDetail::new(summary, "Cook it.\nEat it.");
        detail
            .ingredients
            .push(crate::models::Ingredient::new("water", "1 cup"));
        detail
    }

    /// Add a record
    #[must_use]
    pub fn with_recipe(mut self, recipe: RecipeDetail) -> Self {
        self.recipes.push(recipe);
        self
    }

    /// Make lookups of `id` fail with a network error
    #[must_use]
    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    /// Make every call fail with a network error
    #[must_use]
    pub const fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// All calls made so far
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn search_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ApiCall::Search(_)))
            .count()
    }

    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ApiCall::Lookup(_)))
            .count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RecipeSource for MockSource {
    fn search(&self, query: &str) -> Result<Vec<RecipeSummary>> {
        self.record(ApiCall::Search(query.to_string()));
        if self.offline {
            return Err(RecipeError::Network("offline".into()));
        }

        let needle = query.to_lowercase();
        Ok(self
            .recipes
            .iter()
            .filter(|r| r.summary.name.to_lowercase().contains(&needle))
            .map(|r| r.summary.clone())
            .collect())
    }

    fn lookup(&self, id: &str) -> Result<RecipeDetail> {
        self.record(ApiCall::Lookup(id.to_string()));
        if self.offline || self.failing.contains(id) {
            return Err(RecipeError::Network(format!("lookup of {id} failed")));
        }

        self.recipes
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))
    }
}
