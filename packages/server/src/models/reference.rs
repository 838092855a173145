use serde::Serialize;

use crate::entity::{category, unit_of_measure};

/// Recipe classification such as a cuisine ("Mexican").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Category {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Mexican")]
    pub description: String,
}

impl From<category::Model> for Category {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
        }
    }
}

/// Unit an ingredient amount is expressed in ("Teaspoon").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct UnitOfMeasure {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Teaspoon")]
    pub description: String,
}

impl From<unit_of_measure::Model> for UnitOfMeasure {
    fn from(model: unit_of_measure::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
        }
    }
}
