use tracing::{info, instrument};

use super::ServiceError;
use crate::models::{Notes, Recipe, RecipeForm};
use crate::repository::{CategoryRepository, RecipeRepository};

pub struct RecipeService<'a> {
    recipes: &'a dyn RecipeRepository,
    categories: &'a dyn CategoryRepository,
}

impl<'a> RecipeService<'a> {
    pub fn new(
        recipes: &'a dyn RecipeRepository,
        categories: &'a dyn CategoryRepository,
    ) -> Self {
        Self {
            recipes,
            categories,
        }
    }

    pub async fn list(&self) -> Result<Vec<Recipe>, ServiceError> {
        Ok(self.recipes.find_all().await?)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Recipe, ServiceError> {
        self.recipes
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::recipe_not_found(id))
    }

    pub async fn find_form_by_id(&self, id: i32) -> Result<RecipeForm, ServiceError> {
        let recipe = self.find_by_id(id).await?;
        Ok(RecipeForm::from(&recipe))
    }

    /// Validate and persist a submitted recipe form.
    ///
    /// A form without an id creates a recipe. With an id, scalar fields,
    /// notes and categories are replaced while ingredients and the image
    /// are kept.
    #[instrument(skip(self, form), fields(id = ?form.id))]
    pub async fn save_form(&self, form: &RecipeForm) -> Result<Recipe, ServiceError> {
        let fields = form.validate().map_err(ServiceError::Invalid)?;

        let categories = self.categories.find_by_ids(&fields.category_ids).await?;
        if categories.len() != fields.category_ids.len() {
            return Err(ServiceError::invalid("categories", "unknown category"));
        }

        let mut recipe = match form.id {
            Some(id) => self.find_by_id(id).await?,
            None => Recipe::default(),
        };

        recipe.description = fields.description;
        recipe.prep_time = fields.prep_time;
        recipe.cook_time = fields.cook_time;
        recipe.servings = fields.servings;
        recipe.source = fields.source;
        recipe.url = fields.url;
        recipe.directions = fields.directions;
        recipe.difficulty = fields.difficulty;
        recipe.notes = if fields.notes.trim().is_empty() {
            None
        } else {
            Some(Notes {
                id: recipe.notes.as_ref().and_then(|n| n.id),
                recipe_notes: fields.notes,
            })
        };
        recipe.categories.clear();
        for category in categories {
            recipe.add_category(category);
        }

        let saved = self.recipes.save(recipe).await?;
        info!(id = ?saved.id, "Saved recipe");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        if !self.recipes.delete_by_id(id).await? {
            return Err(ServiceError::recipe_not_found(id));
        }
        info!(id, "Deleted recipe");
        Ok(())
    }
}
