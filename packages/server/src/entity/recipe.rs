use common::Difficulty;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub description: String,
    pub prep_time: i32, // in minutes
    pub cook_time: i32, // in minutes
    pub servings: i32,
    pub source: String,
    pub url: String,
    #[sea_orm(column_type = "Text")]
    pub directions: String,
    pub difficulty: Difficulty,

    /// Raw uploaded image, stored as-is.
    #[sea_orm(column_type = "Blob", nullable)]
    pub image: Option<Vec<u8>>,

    #[sea_orm(has_one)]
    pub notes: HasOne<super::notes::Entity>,

    #[sea_orm(has_many)]
    pub ingredients: HasMany<super::ingredient::Entity>,

    #[sea_orm(has_many, via = "recipe_category")]
    pub categories: HasMany<super::category::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
