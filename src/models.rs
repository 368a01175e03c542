//! Recipe records as the rest of the crate sees them
//!
//! These are immutable snapshots of remote records. They are rebuilt on every
//! fetch and never cached, so they carry no lifecycle of their own.

/// The fields of a recipe needed to draw a result card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    /// Remote identifier, unique per recipe
    pub id: String,
    /// Display name
    pub name: String,
    /// Thumbnail image URL
    pub thumbnail: String,
    /// Category such as "Pasta" or "Dessert"
    pub category: Option<String>,
    /// Region of origin such as "Italian"
    pub area: Option<String>,
}

impl RecipeSummary {
    /// Create a summary with no category or area
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, thumbnail: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail: thumbnail.into(),
            category: None,
            area: None,
        }
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the area
    #[must_use]
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }
}

/// One ingredient row of a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    /// Ingredient name, never empty
    pub name: String,
    /// Quantity text; empty when the record has none
    pub measure: String,
}

impl Ingredient {
    #[must_use]
    pub fn new(name: impl Into<String>, measure: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            measure: measure.into(),
        }
    }
}

/// Everything shown in the detail modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetail {
    /// Card-level fields
    pub summary: RecipeSummary,
    /// Ingredients in their original numbered order
    pub ingredients: Vec<Ingredient>,
    /// Free-text instructions, line breaks preserved
    pub instructions: String,
    /// Video link, if any
    pub video: Option<String>,
    /// Link to the original recipe page, if any
    pub source: Option<String>,
    /// Free-form tags
    pub tags: Vec<String>,
}

impl RecipeDetail {
    /// Create a detail record with no ingredients or links
    #[must_use]
    pub fn new(summary: RecipeSummary, instructions: impl Into<String>) -> Self {
        Self {
            summary,
            ingredients: Vec::new(),
            instructions: instructions.into(),
            video: None,
            source: None,
            tags: Vec::new(),
        }
    }

    /// Recipe identifier
    #[must_use]
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    /// Drop the detail-only fields
    #[must_use]
    pub fn into_summary(self) -> RecipeSummary {
        self.summary
    }
}
