pub mod category;
pub mod ingredient;
pub mod notes;
pub mod recipe;
pub mod recipe_category;
pub mod unit_of_measure;
