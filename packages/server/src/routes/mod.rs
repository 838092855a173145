mod v1;

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa_axum::router::OpenApiRouter;

use crate::config::{CorsConfig, ServerConfig};
use crate::handlers::{image, ingredient, recipe};
use crate::state::AppState;

/// Server-rendered pages.
pub fn page_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(recipe::index))
        .route("/index", get(recipe::index))
        .route("/recipe", post(recipe::save_or_update))
        .route("/recipe/new", get(recipe::new_recipe))
        .route("/recipe/{id}/show", get(recipe::show_by_id))
        .route("/recipe/{id}/update", get(recipe::update_recipe))
        .route("/recipe/{id}/delete", get(recipe::delete_by_id))
        .merge(image_routes(config))
        .merge(ingredient_routes())
}

fn image_routes(config: &ServerConfig) -> Router<AppState> {
    let upload = Router::new()
        .route(
            "/recipe/{id}/image",
            get(image::show_upload_form).post(image::handle_image_post),
        )
        .layer(image::image_upload_body_limit(config));

    Router::new()
        .route("/recipe/{id}/recipeimage", get(image::render_image_from_db))
        .merge(upload)
}

fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recipe/{id}/ingredients",
            get(ingredient::list_ingredients),
        )
        .route(
            "/recipe/{id}/ingredient",
            post(ingredient::save_or_update),
        )
        .route(
            "/recipe/{id}/ingredient/new",
            get(ingredient::new_ingredient),
        )
        .route(
            "/recipe/{id}/ingredient/{iid}/show",
            get(ingredient::show_ingredient),
        )
        .route(
            "/recipe/{id}/ingredient/{iid}/update",
            get(ingredient::update_ingredient),
        )
        .route(
            "/recipe/{id}/ingredient/{iid}/delete",
            get(ingredient::delete_ingredient),
        )
}

/// JSON API, documented with OpenAPI.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/v1", v1::routes())
}

pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o.trim()).ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age))
}
