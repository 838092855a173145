use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub description: String,
    pub amount: Decimal,

    pub recipe_id: i32,
    #[sea_orm(belongs_to, from = "recipe_id", to = "id")]
    pub recipe: HasOne<super::recipe::Entity>,

    /// NULL for countable ingredients ("2 ripe avocados").
    pub uom_id: Option<i32>,
    #[sea_orm(belongs_to, from = "uom_id", to = "id")]
    pub uom: Option<super::unit_of_measure::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
