//! Detail modal body

use super::{meta_line, decorations};
use crate::models::RecipeDetail;

/// One row of the ingredient list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub ingredient: String,
    /// Empty when the record had no measure
    pub measure: String,
}

/// Everything the modal draws for one recipe
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub meta: String,
    pub prep_minutes: u32,
    pub rating: f32,
    pub ingredients: Vec<IngredientLine>,
    /// Instructions split at every line break
    pub paragraphs: Vec<String>,
    /// Present only when the record has a video link
    pub video: Option<String>,
    pub source: Option<String>,
    pub tags: Vec<String>,
}

impl DetailView {
    /// Number of paragraph breaks between instruction paragraphs
    #[must_use]
    pub fn paragraph_separators(&self) -> usize {
        self.paragraphs.len().saturating_sub(1)
    }
}

/// Split instruction text into paragraphs at `\r\n` and `\n`
///
/// Every line break yields exactly one separator, so blank lines survive as
/// empty paragraphs. Empty input yields no paragraphs.
#[must_use]
pub fn split_paragraphs(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.replace("\r\n", "\n")
        .split('\n')
        .map(ToString::to_string)
        .collect()
}

/// Render a recipe into the modal body
#[must_use]
pub fn render_detail(detail: &RecipeDetail) -> DetailView {
    let (prep_minutes, rating) = decorations(detail.id());
    DetailView {
        id: detail.summary.id.clone(),
        name: detail.summary.name.clone(),
        thumbnail: detail.summary.thumbnail.clone(),
        meta: meta_line(&detail.summary),
        prep_minutes,
        rating,
        ingredients: detail
            .ingredients
            .iter()
            .map(|i| IngredientLine {
                ingredient: i.name.clone(),
                measure: i.measure.clone(),
            })
            .collect(),
        paragraphs: split_paragraphs(&detail.instructions),
        video: detail.video.clone(),
        source: detail.source.clone(),
        tags: detail.tags.clone(),
    }
}
