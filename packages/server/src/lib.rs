pub mod bootstrap;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod views;

use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe API",
        version = "1.0.0",
        description = "Read-only JSON access to recipes and their reference data"
    ),
    tags(
        (name = "Recipes", description = "Recipes with notes, categories and ingredients"),
        (name = "Reference Data", description = "Categories and units of measure"),
    ),
)]
struct ApiDoc;

/// Build the application router: HTML pages, the JSON API and its docs.
pub fn build_router(state: AppState) -> axum::Router {
    let (api_router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes())
        .split_for_parts();

    let cors = routes::cors_layer(&state.config.server.cors);

    routes::page_routes(&state.config.server)
        .merge(api_router)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
