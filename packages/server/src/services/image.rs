use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{error, info, instrument};

use super::ServiceError;
use crate::repository::RecipeRepository;

/// Attaches uploaded images to recipes and reads them back.
pub struct ImageService<'a> {
    recipes: &'a dyn RecipeRepository,
}

impl<'a> ImageService<'a> {
    pub fn new(recipes: &'a dyn RecipeRepository) -> Self {
        Self { recipes }
    }

    /// Replace the image of `recipe_id` with everything `file` yields.
    ///
    /// The recipe is looked up before `file` is touched. Nothing is written
    /// unless the whole source was read. Only the image column is written; the
    /// rest of the recipe stays as stored.
    #[instrument(skip(self, file))]
    pub async fn save_image_file<R>(&self, recipe_id: i32, file: R) -> Result<(), ServiceError>
    where
        R: AsyncRead + Send,
    {
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(ServiceError::recipe_not_found(recipe_id));
        }

        let mut file = std::pin::pin!(file);
        let mut bytes = Vec::new();
        if let Err(e) = file.read_to_end(&mut bytes).await {
            error!(recipe_id, error = %e, "Failed to read uploaded image");
            return Err(ServiceError::Io(e));
        }

        let size = bytes.len();
        // The recipe may have been deleted while the upload was streaming.
        if !self.recipes.save_image(recipe_id, bytes).await? {
            return Err(ServiceError::recipe_not_found(recipe_id));
        }

        info!(recipe_id, size, "Stored recipe image");
        Ok(())
    }

    /// Stored image bytes, `None` when the recipe has no image.
    pub async fn find_image(&self, recipe_id: i32) -> Result<Option<Vec<u8>>, ServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| ServiceError::recipe_not_found(recipe_id))?;
        Ok(recipe.image)
    }
}
