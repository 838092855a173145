//! Use cases shared by the HTML pages and the JSON API.

pub mod image;
pub mod ingredient;
pub mod recipe;

use sea_orm::DbErr;

use crate::models::shared::FieldErrors;

pub use image::ImageService;
pub use ingredient::IngredientService;
pub use recipe::RecipeService;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    Invalid(FieldErrors),

    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ServiceError {
    pub fn recipe_not_found(id: i32) -> Self {
        Self::NotFound(format!("Recipe {id} not found"))
    }

    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.push(field, message);
        Self::Invalid(errors)
    }
}
