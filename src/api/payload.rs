//! Wire format of TheMealDB responses
//!
//! Both endpoints answer `{"meals": [record, ...]}`, with `meals` set to
//! `null` (or missing) when nothing matched. Records use flat, numbered
//! ingredient fields (`strIngredient1`..`strIngredient20` and the matching
//! `strMeasureN`), which are folded into an ordered ingredient list here.

use super::{RecipeError, Result};
use crate::models::{Ingredient, RecipeDetail, RecipeSummary};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Highest numbered ingredient slot in a record
pub const MAX_INGREDIENTS: usize = 20;

/// Top-level response body
#[derive(Debug, Deserialize)]
pub struct MealsEnvelope {
    #[serde(default)]
    pub meals: Option<Vec<MealRecord>>,
}

impl MealsEnvelope {
    /// Records in the response; `null` and absent are both empty
    #[must_use]
    pub fn into_records(self) -> Vec<MealRecord> {
        self.meals.unwrap_or_default()
    }
}

/// One raw recipe record
#[derive(Debug, Clone, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,
    #[serde(rename = "strMeal")]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strArea")]
    pub area: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(rename = "strYoutube")]
    pub youtube: Option<String>,
    #[serde(rename = "strSource")]
    pub source: Option<String>,
    #[serde(rename = "strTags")]
    pub tags: Option<String>,
    /// Everything else, including the numbered ingredient fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Treat blank strings like missing ones
fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

impl MealRecord {
    fn numbered(&self, prefix: &str, n: usize) -> Option<&str> {
        self.extra.get(&format!("{prefix}{n}")).and_then(Value::as_str)
    }

    /// Ingredient rows with a non-empty ingredient, in slot order
    #[must_use]
    pub fn ingredients(&self) -> Vec<Ingredient> {
        (1..=MAX_INGREDIENTS)
            .filter_map(|n| {
                let name = present(self.numbered("strIngredient", n))?;
                let measure = present(self.numbered("strMeasure", n)).unwrap_or_default();
                Some(Ingredient { name, measure })
            })
            .collect()
    }

    /// Card fields, or `None` when the record has no identifier
    #[must_use]
    pub fn to_summary(&self) -> Option<RecipeSummary> {
        let id = present(self.id.as_deref())?;
        Some(RecipeSummary {
            id,
            name: present(self.name.as_deref()).unwrap_or_default(),
            thumbnail: present(self.thumbnail.as_deref()).unwrap_or_default(),
            category: present(self.category.as_deref()),
            area: present(self.area.as_deref()),
        })
    }

    /// Full detail, or `None` when the record has no identifier
    #[must_use]
    pub fn to_detail(&self) -> Option<RecipeDetail> {
        let summary = self.to_summary()?;
        let tags = self
            .tags
            .as_deref()
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(RecipeDetail {
            summary,
            ingredients: self.ingredients(),
            instructions: self.instructions.clone().unwrap_or_default(),
            video: present(self.youtube.as_deref()),
            source: present(self.source.as_deref()),
            tags,
        })
    }
}

fn parse_envelope(body: &str) -> Result<MealsEnvelope> {
    serde_json::from_str(body).map_err(|e| RecipeError::Network(format!("malformed response: {e}")))
}

/// Parse a search response body
///
/// # Errors
///
/// Returns `RecipeError::Network` if the body is not a valid envelope.
pub fn parse_search(body: &str) -> Result<Vec<RecipeSummary>> {
    Ok(parse_envelope(body)?
        .into_records()
        .iter()
        .filter_map(MealRecord::to_summary)
        .collect())
}

/// Parse a lookup response body for `id`
///
/// # Errors
///
/// Returns `RecipeError::Network` if the body is not a valid envelope and
/// `RecipeError::NotFound` if it carries no record with identifier `id`.
pub fn parse_lookup(body: &str, id: &str) -> Result<RecipeDetail> {
    parse_envelope(body)?
        .into_records()
        .iter()
        .filter_map(MealRecord::to_detail)
        .find(|detail| detail.id() == id)
        .ok_or_else(|| RecipeError::NotFound(id.to_string()))
}
