use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::api;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(api::list_recipes))
        .routes(routes!(api::get_recipe))
        .routes(routes!(api::list_categories))
        .routes(routes!(api::list_units_of_measure))
}
