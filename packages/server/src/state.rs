use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::repository::{
    CategoryRepository, RecipeRepository, SeaOrmRepository, UnitOfMeasureRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub recipes: Arc<dyn RecipeRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub units: Arc<dyn UnitOfMeasureRepository>,
}

impl AppState {
    /// State backed by SeaORM repositories on `db`.
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let repo = Arc::new(SeaOrmRepository::new(db));
        Self {
            config: Arc::new(config),
            recipes: repo.clone(),
            categories: repo.clone(),
            units: repo,
        }
    }
}
