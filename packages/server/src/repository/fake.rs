//! In-memory repositories for service and bootstrap unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sea_orm::DbErr;

use super::{CategoryRepository, RecipeRepository, UnitOfMeasureRepository};
use crate::models::{Category, Recipe, UnitOfMeasure};

#[derive(Default)]
pub struct FakeRecipeRepository {
    recipes: Mutex<Vec<Recipe>>,
    next_id: AtomicUsize,
    pub save_calls: AtomicUsize,
    pub save_all_calls: AtomicUsize,
    pub save_image_calls: AtomicUsize,
}

impl FakeRecipeRepository {
    pub fn with(recipes: Vec<Recipe>) -> Self {
        // Ids are shared across recipes and ingredients so new rows always sort last.
        let next = recipes
            .iter()
            .flat_map(|r| std::iter::once(r.id).chain(r.ingredients.iter().map(|i| i.id)))
            .flatten()
            .max()
            .unwrap_or(0) as usize;
        Self {
            recipes: Mutex::new(recipes),
            next_id: AtomicUsize::new(next),
            ..Default::default()
        }
    }

    pub fn writes(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
            + self.save_all_calls.load(Ordering::SeqCst)
            + self.save_image_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self, id: i32) -> Option<Recipe> {
        self.recipes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == Some(id))
            .cloned()
    }

    fn next_id(&self) -> i32 {
        (self.next_id.fetch_add(1, Ordering::SeqCst) + 1) as i32
    }

    fn store(&self, mut recipe: Recipe) -> Recipe {
        let id = *recipe.id.get_or_insert_with(|| self.next_id());
        if let Some(notes) = recipe.notes.as_mut() {
            notes.id.get_or_insert(id);
        }
        for ingredient in &mut recipe.ingredients {
            if ingredient.id.is_none() {
                ingredient.id = Some(self.next_id());
            }
            ingredient.recipe_id = Some(id);
        }
        let mut recipes = self.recipes.lock().unwrap();
        recipes.retain(|r| r.id != Some(id));
        recipes.push(recipe.clone());
        recipes.sort_by_key(|r| r.id);
        recipe
    }
}

#[async_trait]
impl RecipeRepository for FakeRecipeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, DbErr> {
        Ok(self.stored(id))
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, DbErr> {
        Ok(self.recipes.lock().unwrap().clone())
    }

    async fn save(&self, recipe: Recipe) -> Result<Recipe, DbErr> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.store(recipe))
    }

    async fn save_all(&self, recipes: Vec<Recipe>) -> Result<Vec<Recipe>, DbErr> {
        self.save_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(recipes.into_iter().map(|r| self.store(r)).collect())
    }

    async fn save_image(&self, id: i32, image: Vec<u8>) -> Result<bool, DbErr> {
        self.save_image_calls.fetch_add(1, Ordering::SeqCst);
        let mut recipes = self.recipes.lock().unwrap();
        match recipes.iter_mut().find(|r| r.id == Some(id)) {
            Some(recipe) => {
                recipe.image = Some(image);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let mut recipes = self.recipes.lock().unwrap();
        let before = recipes.len();
        recipes.retain(|r| r.id != Some(id));
        Ok(recipes.len() != before)
    }
}

#[derive(Default)]
pub struct FakeCategoryRepository {
    pub categories: Vec<Category>,
}

impl FakeCategoryRepository {
    pub fn named(names: &[&str]) -> Self {
        Self {
            categories: names
                .iter()
                .zip(1..)
                .map(|(name, id)| Category {
                    id,
                    description: (*name).to_string(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl CategoryRepository for FakeCategoryRepository {
    async fn find_by_description(&self, description: &str) -> Result<Option<Category>, DbErr> {
        Ok(self
            .categories
            .iter()
            .find(|c| c.description == description)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Category>, DbErr> {
        Ok(self
            .categories
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Category>, DbErr> {
        Ok(self.categories.clone())
    }
}

#[derive(Default)]
pub struct FakeUnitOfMeasureRepository {
    pub units: Vec<UnitOfMeasure>,
}

impl FakeUnitOfMeasureRepository {
    pub fn named(names: &[&str]) -> Self {
        Self {
            units: names
                .iter()
                .zip(1..)
                .map(|(name, id)| UnitOfMeasure {
                    id,
                    description: (*name).to_string(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl UnitOfMeasureRepository for FakeUnitOfMeasureRepository {
    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<UnitOfMeasure>, DbErr> {
        Ok(self
            .units
            .iter()
            .find(|u| u.description == description)
            .cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UnitOfMeasure>, DbErr> {
        Ok(self.units.iter().find(|u| u.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<UnitOfMeasure>, DbErr> {
        Ok(self.units.clone())
    }
}
