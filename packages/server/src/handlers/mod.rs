pub mod api;
pub mod image;
pub mod ingredient;
pub mod recipe;
