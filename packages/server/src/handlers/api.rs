use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{ApiError, ErrorBody};
use crate::extractors::path::ApiPath;
use crate::models::recipe::{RecipeListResponse, RecipeResponse, RecipeSummary};
use crate::models::{Category, UnitOfMeasure};
use crate::repository::{CategoryRepository, UnitOfMeasureRepository};
use crate::services::RecipeService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "Recipes",
    operation_id = "listRecipes",
    summary = "List recipes",
    description = "Returns every recipe ordered by ID. Ingredients, notes and directions are omitted from list results.",
    responses(
        (status = 200, description = "List of recipes", body = RecipeListResponse),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<RecipeListResponse>, ApiError> {
    let recipes = RecipeService::new(&*state.recipes, &*state.categories)
        .list()
        .await?;
    let data: Vec<RecipeSummary> = recipes.iter().map(RecipeSummary::from).collect();
    let total = data.len() as u64;
    Ok(Json(RecipeListResponse { data, total }))
}

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "Recipes",
    operation_id = "getRecipe",
    summary = "Get a recipe by ID",
    description = "Returns a recipe with its notes, categories and ingredients. The image is served by `GET /recipe/{id}/recipeimage`.",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 400, description = "Malformed ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let recipe = RecipeService::new(&*state.recipes, &*state.categories)
        .find_by_id(id)
        .await?;
    Ok(Json(recipe.into()))
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Reference Data",
    operation_id = "listCategories",
    summary = "List recipe categories",
    responses(
        (status = 200, description = "Categories ordered by description", body = Vec<Category>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.categories.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/units-of-measure",
    tag = "Reference Data",
    operation_id = "listUnitsOfMeasure",
    summary = "List units of measure",
    responses(
        (status = 200, description = "Units ordered by description", body = Vec<UnitOfMeasure>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_units_of_measure(
    State(state): State<AppState>,
) -> Result<Json<Vec<UnitOfMeasure>>, ApiError> {
    Ok(Json(state.units.find_all().await?))
}
