pub mod ingredient;
pub mod recipe;
pub mod reference;
pub mod shared;

pub use ingredient::{Ingredient, IngredientForm};
pub use recipe::{Notes, Recipe, RecipeForm};
pub use reference::{Category, UnitOfMeasure};
