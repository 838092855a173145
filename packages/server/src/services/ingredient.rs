use sea_orm::DbErr;
use tracing::{info, instrument};

use super::ServiceError;
use crate::models::{Ingredient, IngredientForm, Recipe, UnitOfMeasure};
use crate::repository::{RecipeRepository, UnitOfMeasureRepository};

/// Ingredient edits, always written through the owning recipe.
pub struct IngredientService<'a> {
    recipes: &'a dyn RecipeRepository,
    units: &'a dyn UnitOfMeasureRepository,
}

impl<'a> IngredientService<'a> {
    pub fn new(
        recipes: &'a dyn RecipeRepository,
        units: &'a dyn UnitOfMeasureRepository,
    ) -> Self {
        Self { recipes, units }
    }

    async fn recipe(&self, recipe_id: i32) -> Result<Recipe, ServiceError> {
        self.recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| ServiceError::recipe_not_found(recipe_id))
    }

    pub async fn list(&self, recipe_id: i32) -> Result<Vec<Ingredient>, ServiceError> {
        Ok(self.recipe(recipe_id).await?.ingredients)
    }

    pub async fn find(&self, recipe_id: i32, ingredient_id: i32) -> Result<Ingredient, ServiceError> {
        self.recipe(recipe_id)
            .await?
            .ingredient(ingredient_id)
            .cloned()
            .ok_or_else(|| ingredient_not_found(recipe_id, ingredient_id))
    }

    /// Blank form for a new ingredient of an existing recipe.
    pub async fn new_form(&self, recipe_id: i32) -> Result<IngredientForm, ServiceError> {
        self.recipe(recipe_id).await?;
        Ok(IngredientForm::default())
    }

    pub async fn units(&self) -> Result<Vec<UnitOfMeasure>, ServiceError> {
        Ok(self.units.find_all().await?)
    }

    /// Create (no id) or update (id) an ingredient. Returns its id.
    #[instrument(skip(self, form), fields(ingredient_id = ?form.id))]
    pub async fn save(&self, recipe_id: i32, form: &IngredientForm) -> Result<i32, ServiceError> {
        let fields = form.validate().map_err(ServiceError::Invalid)?;
        let mut recipe = self.recipe(recipe_id).await?;

        let uom = match fields.uom_id {
            Some(id) => Some(
                self.units
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| ServiceError::invalid("uom_id", "unknown unit of measure"))?,
            ),
            None => None,
        };

        match form.id {
            Some(ingredient_id) => {
                let existing = recipe
                    .ingredients
                    .iter_mut()
                    .find(|i| i.id == Some(ingredient_id))
                    .ok_or_else(|| ingredient_not_found(recipe_id, ingredient_id))?;
                existing.description = fields.description;
                existing.amount = fields.amount;
                existing.uom = uom;
            }
            None => {
                recipe.add_ingredient(Ingredient::new(fields.description, fields.amount, uom.as_ref()));
            }
        }

        let saved = self.recipes.save(recipe).await?;
        // Newly inserted rows get the highest id of the recipe.
        let id = match form.id {
            Some(id) => id,
            None => saved
                .ingredients
                .iter()
                .filter_map(|i| i.id)
                .max()
                .ok_or_else(|| DbErr::RecordNotInserted)?,
        };

        info!(recipe_id, ingredient_id = id, "Saved ingredient");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, recipe_id: i32, ingredient_id: i32) -> Result<(), ServiceError> {
        let mut recipe = self.recipe(recipe_id).await?;

        let before = recipe.ingredients.len();
        recipe.ingredients.retain(|i| i.id != Some(ingredient_id));
        if recipe.ingredients.len() == before {
            return Err(ingredient_not_found(recipe_id, ingredient_id));
        }

        self.recipes.save(recipe).await?;
        info!(recipe_id, ingredient_id, "Deleted ingredient");
        Ok(())
    }
}

fn ingredient_not_found(recipe_id: i32, ingredient_id: i32) -> ServiceError {
    ServiceError::NotFound(format!(
        "Ingredient {ingredient_id} not found in recipe {recipe_id}"
    ))
}
