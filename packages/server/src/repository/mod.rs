//! Persistence gateway for recipes and their reference data.
//!
//! Services depend on these traits rather than on SeaORM directly so that the
//! recipe aggregate is always loaded and saved as one unit.

mod sea;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::models::{Category, Recipe, UnitOfMeasure};

pub use sea::SeaOrmRepository;

/// Recipe aggregate storage.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Load a recipe with its notes, categories and ingredients.
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, DbErr>;

    /// Load every recipe, ordered by id.
    async fn find_all(&self) -> Result<Vec<Recipe>, DbErr>;

    /// Insert (no id) or update (id) a recipe and everything it owns.
    ///
    /// Owned rows missing from the aggregate are deleted. Returns the recipe as
    /// re-read from storage, with all ids assigned.
    async fn save(&self, recipe: Recipe) -> Result<Recipe, DbErr>;

    /// Save several recipes in one transaction.
    async fn save_all(&self, recipes: Vec<Recipe>) -> Result<Vec<Recipe>, DbErr>;

    /// Replace the image column of one recipe. Nothing else is written.
    ///
    /// Returns `false` if the recipe does not exist.
    async fn save_image(&self, id: i32, image: Vec<u8>) -> Result<bool, DbErr>;

    /// Delete a recipe with its notes, ingredients and category links.
    ///
    /// Returns `true` if the recipe was deleted, `false` if it did not exist.
    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr>;
}

/// Read-only access to recipe categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_description(&self, description: &str) -> Result<Option<Category>, DbErr>;

    /// Categories with the given ids. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Category>, DbErr>;

    /// All categories, ordered by description.
    async fn find_all(&self) -> Result<Vec<Category>, DbErr>;
}

/// Read-only access to units of measure.
#[async_trait]
pub trait UnitOfMeasureRepository: Send + Sync {
    async fn find_by_description(&self, description: &str)
    -> Result<Option<UnitOfMeasure>, DbErr>;

    async fn find_by_id(&self, id: i32) -> Result<Option<UnitOfMeasure>, DbErr>;

    /// All units, ordered by description.
    async fn find_all(&self) -> Result<Vec<UnitOfMeasure>, DbErr>;
}
