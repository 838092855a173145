use std::io::Cursor;

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use futures::TryStreamExt;
use tokio_util::io::{ReaderStream, StreamReader};
use tracing::instrument;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::extractors::path::AppPath;
use crate::services::{ImageService, RecipeService};
use crate::state::AppState;
use crate::views;

/// Multipart field carrying the image bytes.
const IMAGE_FIELD: &str = "imagefile";

pub fn image_upload_body_limit(config: &ServerConfig) -> DefaultBodyLimit {
    DefaultBodyLimit::max(config.max_upload_bytes)
}

#[instrument(skip(state))]
pub async fn show_upload_form(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<views::Page, AppError> {
    let recipe = RecipeService::new(&*state.recipes, &*state.categories)
        .find_by_id(id)
        .await?;
    Ok(views::recipe::image_upload_form(&recipe))
}

/// Store the `imagefile` part as the recipe image, then go back to the recipe.
#[instrument(skip(state, multipart))]
pub async fn handle_image_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file = StreamReader::new(field.map_err(std::io::Error::other));
        ImageService::new(&*state.recipes)
            .save_image_file(id, file)
            .await?;
        return Ok(Redirect::to(&format!("/recipe/{id}/show")));
    }

    Err(AppError::Validation(format!(
        "Missing '{IMAGE_FIELD}' field"
    )))
}

/// Stream the stored image. A recipe without an image yields an empty 200.
#[instrument(skip(state))]
pub async fn render_image_from_db(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    let Some(bytes) = ImageService::new(&*state.recipes).find_image(id).await? else {
        return Ok(StatusCode::OK.into_response());
    };

    let len = bytes.len();
    let body = Body::from_stream(ReaderStream::new(Cursor::new(bytes)));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, state.config.images.content_type.as_str())
        .header(header::CONTENT_LENGTH, len.to_string())
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
