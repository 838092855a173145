use common::Difficulty;
use serde::{Deserialize, Serialize};

use super::ingredient::{Ingredient, IngredientResponse};
use super::reference::Category;
use super::shared::{FieldErrors, empty_string_as_none, validate_range, validate_text};

/// Free-text notes owned by exactly one recipe.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notes {
    /// `None` until persisted.
    pub id: Option<i32>,
    pub recipe_notes: String,
}

impl Notes {
    pub fn new(recipe_notes: impl Into<String>) -> Self {
        Self {
            id: None,
            recipe_notes: recipe_notes.into(),
        }
    }
}

/// A recipe together with everything it owns or references.
///
/// This is the unit the recipe repository loads and saves: the recipe row,
/// its notes, its ingredients (with their units) and its category links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recipe {
    /// `None` until persisted.
    pub id: Option<i32>,
    pub description: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub source: String,
    pub url: String,
    pub directions: String,
    pub difficulty: Difficulty,
    pub image: Option<Vec<u8>>,
    pub notes: Option<Notes>,
    pub categories: Vec<Category>,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Attach an ingredient to this recipe, pointing its back-reference here.
    pub fn add_ingredient(&mut self, mut ingredient: Ingredient) -> &mut Self {
        ingredient.recipe_id = self.id;
        self.ingredients.push(ingredient);
        self
    }

    /// Link a category unless it is already linked.
    pub fn add_category(&mut self, category: Category) -> &mut Self {
        if !self.categories.iter().any(|c| c.id == category.id) {
            self.categories.push(category);
        }
        self
    }

    pub fn ingredient(&self, ingredient_id: i32) -> Option<&Ingredient> {
        self.ingredients
            .iter()
            .find(|i| i.id == Some(ingredient_id))
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// Recipe create/edit form as posted by the browser.
///
/// Numbers arrive as text so that a malformed value becomes a field error
/// on the re-rendered form instead of a rejected request.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RecipeForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub servings: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub directions: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub categories: Vec<i32>,
}

/// A [`RecipeForm`] that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeFields {
    pub description: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub source: String,
    pub url: String,
    pub directions: String,
    pub difficulty: Difficulty,
    pub notes: String,
    pub category_ids: Vec<i32>,
}

impl RecipeForm {
    pub fn validate(&self) -> Result<RecipeFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        validate_text(&mut errors, "description", &self.description, 3, 255);
        let prep_time = validate_range(&mut errors, "prep_time", &self.prep_time, 1, 999);
        let cook_time = validate_range(&mut errors, "cook_time", &self.cook_time, 1, 999);
        let servings = validate_range(&mut errors, "servings", &self.servings, 1, 100);

        let url = self.url.trim();
        if !url.is_empty() && !is_web_url(url) {
            errors.push("url", "must be a valid http(s) URL");
        }

        if self.directions.trim().is_empty() {
            errors.push("directions", "must not be blank");
        }

        let difficulty = if self.difficulty.trim().is_empty() {
            Difficulty::default()
        } else {
            match self.difficulty.parse::<Difficulty>() {
                Ok(d) => d,
                Err(e) => {
                    errors.push("difficulty", e.to_string());
                    Difficulty::default()
                }
            }
        };

        let mut category_ids = self.categories.clone();
        category_ids.sort_unstable();
        category_ids.dedup();

        errors.into_result(RecipeFields {
            description: self.description.trim().to_string(),
            prep_time,
            cook_time,
            servings,
            source: self.source.trim().to_string(),
            url: url.to_string(),
            directions: self.directions.clone(),
            difficulty,
            notes: self.notes.clone(),
            category_ids,
        })
    }
}

impl From<&Recipe> for RecipeForm {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            description: recipe.description.clone(),
            prep_time: recipe.prep_time.to_string(),
            cook_time: recipe.cook_time.to_string(),
            servings: recipe.servings.to_string(),
            source: recipe.source.clone(),
            url: recipe.url.clone(),
            directions: recipe.directions.clone(),
            difficulty: recipe.difficulty.as_str().to_string(),
            notes: recipe
                .notes
                .as_ref()
                .map(|n| n.recipe_notes.clone())
                .unwrap_or_default(),
            categories: recipe.categories.iter().map(|c| c.id).collect(),
        }
    }
}

fn is_web_url(s: &str) -> bool {
    url::Url::parse(s)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

/// Response DTO for a single recipe. The image itself is served separately.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Perfect Guacamole")]
    pub description: String,
    /// Preparation time in minutes.
    #[schema(example = 10)]
    pub prep_time: i32,
    /// Cooking time in minutes.
    #[schema(example = 0)]
    pub cook_time: i32,
    #[schema(example = 4)]
    pub servings: i32,
    pub source: String,
    pub url: String,
    pub directions: String,
    pub difficulty: Difficulty,
    /// Whether `GET /recipe/{id}/recipeimage` returns image bytes.
    pub has_image: bool,
    pub notes: Option<String>,
    pub categories: Vec<Category>,
    pub ingredients: Vec<IngredientResponse>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        let has_image = recipe.has_image();
        Self {
            id: recipe.id.unwrap_or_default(),
            description: recipe.description,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
            source: recipe.source,
            url: recipe.url,
            directions: recipe.directions,
            difficulty: recipe.difficulty,
            has_image,
            notes: recipe.notes.map(|n| n.recipe_notes),
            categories: recipe.categories,
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(IngredientResponse::from)
                .collect(),
        }
    }
}

/// Compact recipe entry for list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeSummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Perfect Guacamole")]
    pub description: String,
    pub difficulty: Difficulty,
    pub has_image: bool,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.unwrap_or_default(),
            description: recipe.description.clone(),
            difficulty: recipe.difficulty,
            has_image: recipe.has_image(),
        }
    }
}

/// Response DTO for listing recipes.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeListResponse {
    pub data: Vec<RecipeSummary>,
    pub total: u64,
}
