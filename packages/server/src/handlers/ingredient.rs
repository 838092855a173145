use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::{Form, FormRejection};
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::path::AppPath;
use crate::models::IngredientForm;
use crate::models::shared::FieldErrors;
use crate::services::{IngredientService, ServiceError};
use crate::state::AppState;
use crate::views;

fn service(state: &AppState) -> IngredientService<'_> {
    IngredientService::new(&*state.recipes, &*state.units)
}

#[instrument(skip(state))]
pub async fn list_ingredients(
    State(state): State<AppState>,
    AppPath(recipe_id): AppPath<i32>,
) -> Result<views::Page, AppError> {
    let ingredients = service(&state).list(recipe_id).await?;
    Ok(views::ingredient::list(recipe_id, &ingredients))
}

#[instrument(skip(state))]
pub async fn show_ingredient(
    State(state): State<AppState>,
    AppPath((recipe_id, ingredient_id)): AppPath<(i32, i32)>,
) -> Result<views::Page, AppError> {
    let ingredient = service(&state).find(recipe_id, ingredient_id).await?;
    Ok(views::ingredient::show(recipe_id, &ingredient))
}

#[instrument(skip(state))]
pub async fn new_ingredient(
    State(state): State<AppState>,
    AppPath(recipe_id): AppPath<i32>,
) -> Result<views::Page, AppError> {
    let service = service(&state);
    let form = service.new_form(recipe_id).await?;
    let units = service.units().await?;
    Ok(views::ingredient::form(
        recipe_id,
        &form,
        &units,
        &FieldErrors::new(),
    ))
}

#[instrument(skip(state))]
pub async fn update_ingredient(
    State(state): State<AppState>,
    AppPath((recipe_id, ingredient_id)): AppPath<(i32, i32)>,
) -> Result<views::Page, AppError> {
    let service = service(&state);
    let ingredient = service.find(recipe_id, ingredient_id).await?;
    let units = service.units().await?;
    Ok(views::ingredient::form(
        recipe_id,
        &IngredientForm::from(&ingredient),
        &units,
        &FieldErrors::new(),
    ))
}

#[instrument(skip(state, form))]
pub async fn save_or_update(
    State(state): State<AppState>,
    AppPath(recipe_id): AppPath<i32>,
    form: Result<Form<IngredientForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(|e| AppError::Validation(e.to_string()))?;
    let service = service(&state);

    match service.save(recipe_id, &form).await {
        Ok(ingredient_id) => Ok(Redirect::to(&format!(
            "/recipe/{recipe_id}/ingredient/{ingredient_id}/show"
        ))
        .into_response()),
        Err(ServiceError::Invalid(errors)) => {
            let units = service.units().await?;
            Ok(views::ingredient::form(recipe_id, &form, &units, &errors).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip(state))]
pub async fn delete_ingredient(
    State(state): State<AppState>,
    AppPath((recipe_id, ingredient_id)): AppPath<(i32, i32)>,
) -> Result<Redirect, AppError> {
    service(&state).delete(recipe_id, ingredient_id).await?;
    Ok(Redirect::to(&format!("/recipe/{recipe_id}/ingredients")))
}
