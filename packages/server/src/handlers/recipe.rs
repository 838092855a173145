use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::{Form, FormRejection};
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::path::AppPath;
use crate::models::RecipeForm;
use crate::models::shared::FieldErrors;
use crate::repository::CategoryRepository;
use crate::services::{RecipeService, ServiceError};
use crate::state::AppState;
use crate::views;

fn service(state: &AppState) -> RecipeService<'_> {
    RecipeService::new(&*state.recipes, &*state.categories)
}

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<views::Page, AppError> {
    let recipes = service(&state).list().await?;
    Ok(views::recipe::index(&recipes))
}

#[instrument(skip(state))]
pub async fn show_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<views::Page, AppError> {
    let recipe = service(&state).find_by_id(id).await?;
    Ok(views::recipe::show(&recipe))
}

#[instrument(skip(state))]
pub async fn new_recipe(State(state): State<AppState>) -> Result<views::Page, AppError> {
    let categories = state.categories.find_all().await?;
    Ok(views::recipe::form(
        &RecipeForm::default(),
        &categories,
        &FieldErrors::new(),
    ))
}

#[instrument(skip(state))]
pub async fn update_recipe(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<views::Page, AppError> {
    let form = service(&state).find_form_by_id(id).await?;
    let categories = state.categories.find_all().await?;
    Ok(views::recipe::form(&form, &categories, &FieldErrors::new()))
}

/// Create or update a recipe from the posted form.
///
/// An invalid form is shown again with its errors; a saved recipe redirects
/// to its page.
#[instrument(skip(state, form))]
pub async fn save_or_update(
    State(state): State<AppState>,
    form: Result<Form<RecipeForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(|e| AppError::Validation(e.to_string()))?;

    match service(&state).save_form(&form).await {
        Ok(saved) => {
            let id = saved.id.unwrap_or_default();
            Ok(Redirect::to(&format!("/recipe/{id}/show")).into_response())
        }
        Err(ServiceError::Invalid(errors)) => {
            let categories = state.categories.find_all().await?;
            Ok(views::recipe::form(&form, &categories, &errors).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip(state))]
pub async fn delete_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Redirect, AppError> {
    service(&state).delete_by_id(id).await?;
    Ok(Redirect::to("/"))
}
