//! Access to the remote recipe service
//!
//! The service is consumed through the [`RecipeSource`] trait so controllers
//! and tests never depend on a live network. [`MealDbClient`] is the HTTP
//! implementation against TheMealDB's JSON API.
//!
//! # Outcomes
//!
//! - A search with no matches is `Ok(vec![])`, not an error
//! - A lookup with no matching record is [`RecipeError::NotFound`]
//! - Transport failures and unparsable bodies are [`RecipeError::Network`]

use crate::models::{RecipeDetail, RecipeSummary};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

mod client;
pub mod payload;

#[cfg(test)]
pub mod mock;

pub use client::{ApiSettings, MealDbClient};

/// Failures reported by a recipe source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    /// Transport failure or unparsable response
    #[error("network error: {0}")]
    Network(String),

    /// Well-formed response without the requested record
    #[error("recipe {0} not found")]
    NotFound(String),
}

/// Result type for recipe source operations
pub type Result<T> = std::result::Result<T, RecipeError>;

/// Most lookups [`RecipeSource::lookup_many`] keeps in flight at once
pub const MAX_FANOUT: usize = 32;

/// A provider of recipe records
///
/// Implementations must be shareable across threads: lookups fan out on a
/// thread pool and network jobs run off the UI thread.
pub trait RecipeSource: Send + Sync {
    /// Find recipes whose name matches `query`
    ///
    /// Callers must not pass an empty or whitespace-only query.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::Network` on transport or parse failure.
    fn search(&self, query: &str) -> Result<Vec<RecipeSummary>>;

    /// Fetch the full record for `id`
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::NotFound` if no record matches and
    /// `RecipeError::Network` on transport or parse failure.
    fn lookup(&self, id: &str) -> Result<RecipeDetail>;

    /// Look up every id concurrently and keep the ones that resolved
    ///
    /// Failed or missing ids are dropped. The output follows input order.
    ///
    /// Lookups block on I/O, so they run on a pool of their own with one
    /// thread per id (up to [`MAX_FANOUT`]) instead of the caller's pool.
    fn lookup_many(&self, ids: &[String]) -> Vec<RecipeDetail> {
        if ids.is_empty() {
            return Vec::new();
        }

        let settled: Vec<Result<RecipeDetail>> = match ThreadPoolBuilder::new()
            .num_threads(ids.len().min(MAX_FANOUT))
            .build()
        {
            Ok(pool) => pool.install(|| {
                ids.par_iter()
                    .with_max_len(1)
                    .map(|id| self.lookup(id))
                    .collect()
            }),
            Err(e) => {
                warn!(error = %e, "lookup pool unavailable, resolving sequentially");
                ids.iter().map(|id| self.lookup(id)).collect()
            }
        };

        ids.iter()
            .zip(settled)
            .filter_map(|(id, result)| match result {
                Ok(detail) => Some(detail),
                Err(e) => {
                    debug!(id = %id, error = %e, "dropping unresolved recipe");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockSource;
    use super::*;

    use std::sync::{Condvar, Mutex};
    use std::time::Duration;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    /// Resolves a lookup only once `expected` lookups are in flight together
    struct RendezvousSource {
        expected: usize,
        arrived: Mutex<usize>,
        all_arrived: Condvar,
    }

    impl RendezvousSource {
        fn new(expected: usize) -> Self {
            Self {
                expected,
                arrived: Mutex::new(0),
                all_arrived: Condvar::new(),
            }
        }
    }

    impl RecipeSource for RendezvousSource {
        fn search(&self, _query: &str) -> Result<Vec<RecipeSummary>> {
            Ok(Vec::new())
        }

        fn lookup(&self, id: &str) -> Result<RecipeDetail> {
            let mut arrived = self.arrived.lock().unwrap();
            *arrived += 1;
            self.all_arrived.notify_all();
            let (_arrived, wait) = self
                .all_arrived
                .wait_timeout_while(arrived, Duration::from_secs(2), |n| *n < self.expected)
                .unwrap();
            if wait.timed_out() {
                return Err(RecipeError::Network("lookups ran one at a time".into()));
            }
            Ok(MockSource::detail(id, id))
        }
    }

    #[test]
    fn test_lookup_many_keeps_every_lookup_in_flight() {
        let source = RendezvousSource::new(4);
        let found = source.lookup_many(&ids(&["a", "b", "c", "d"]));
        let order: Vec<&str> = found.iter().map(RecipeDetail::id).collect();
        assert_eq!(order, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_lookup_many_is_concurrent_inside_a_single_thread_pool() {
        let source = RendezvousSource::new(2);
        let narrow = ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let found = narrow.install(|| source.lookup_many(&ids(&["a", "b"])));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_lookup_many_drops_missing_and_keeps_order() {
        let source = MockSource::new()
            .with_recipe(MockSource::detail("a", "Apple Pie"))
            .with_recipe(MockSource::detail("b", "Beef Stew"));

        let found = source.lookup_many(&ids(&["a", "missing", "b"]));
        let names: Vec<&str> = found.iter().map(|d| d.summary.name.as_str()).collect();
        assert_eq!(names, ["Apple Pie", "Beef Stew"]);
    }

    #[test]
    fn test_lookup_many_drops_network_failures() {
        let source = MockSource::new()
            .with_recipe(MockSource::detail("a", "Apple Pie"))
            .with_recipe(MockSource::detail("b", "Beef Stew"))
            .failing("a");

        let found = source.lookup_many(&ids(&["a", "b"]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), "b");
    }

    #[test]
    fn test_lookup_many_preserves_input_order_not_insertion_order() {
        let source = MockSource::new()
            .with_recipe(MockSource::detail("1", "One"))
            .with_recipe(MockSource::detail("2", "Two"))
            .with_recipe(MockSource::detail("3", "Three"));

        let found = source.lookup_many(&ids(&["3", "1", "2"]));
        let order: Vec<&str> = found.iter().map(RecipeDetail::id).collect();
        assert_eq!(order, ["3", "1", "2"]);
    }

    #[test]
    fn test_lookup_many_empty() {
        let source = MockSource::new();
        assert!(source.lookup_many(&[]).is_empty());
        assert_eq!(source.lookup_count(), 0);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            RecipeError::NotFound("52771".into()).to_string(),
            "recipe 52771 not found"
        );
        assert_eq!(
            RecipeError::Network("timed out".into()).to_string(),
            "network error: timed out"
        );
    }
}
