use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::info;

use crate::entity::{category, unit_of_measure};

/// Units of measure seeded on startup.
pub const DEFAULT_UNITS: &[&str] = &[
    "Teaspoon",
    "Tablespoon",
    "Cup",
    "Pinch",
    "Ounce",
    "Each",
    "Pint",
    "Dash",
];

/// Recipe categories seeded on startup.
pub const DEFAULT_CATEGORIES: &[&str] = &["American", "Italian", "Mexican", "Fast Food"];

/// Seed the `unit_of_measure` and `category` tables. Existing rows are kept.
pub async fn seed_reference_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut units_inserted = 0u64;
    for &description in DEFAULT_UNITS {
        let model = unit_of_measure::ActiveModel {
            id: NotSet,
            description: Set(description.to_string()),
        };

        let result = unit_of_measure::Entity::insert(model)
            .on_conflict(
                OnConflict::column(unit_of_measure::Column::Description)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) => units_inserted += n,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if units_inserted > 0 {
        info!("Seeded {} new units of measure", units_inserted);
    }

    let mut categories_inserted = 0u64;
    for &description in DEFAULT_CATEGORIES {
        let model = category::ActiveModel {
            id: NotSet,
            description: Set(description.to_string()),
        };

        let result = category::Entity::insert(model)
            .on_conflict(
                OnConflict::column(category::Column::Description)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) => categories_inserted += n,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if categories_inserted > 0 {
        info!("Seeded {} new categories", categories_inserted);
    }

    Ok(())
}
