use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, instrument};

use super::{CategoryRepository, RecipeRepository, UnitOfMeasureRepository};
use crate::entity::{category, ingredient, notes, recipe, recipe_category, unit_of_measure};
use crate::models::{Category, Ingredient, Notes, Recipe, UnitOfMeasure};

/// SeaORM-backed implementation of every repository trait.
#[derive(Clone)]
pub struct SeaOrmRepository {
    db: DatabaseConnection,
}

impl SeaOrmRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeRepository for SeaOrmRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, DbErr> {
        let Some(row) = recipe::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(assemble(&self.db, vec![row]).await?.pop())
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, DbErr> {
        let rows = recipe::Entity::find()
            .order_by_asc(recipe::Column::Id)
            .all(&self.db)
            .await?;
        assemble(&self.db, rows).await
    }

    #[instrument(skip(self, recipe), fields(id = ?recipe.id))]
    async fn save(&self, recipe: Recipe) -> Result<Recipe, DbErr> {
        let txn = self.db.begin().await?;
        let id = save_aggregate(&txn, recipe).await?;
        let saved = load_saved(&txn, id).await?;
        txn.commit().await?;
        Ok(saved)
    }

    #[instrument(skip(self, recipes), fields(count = recipes.len()))]
    async fn save_all(&self, recipes: Vec<Recipe>) -> Result<Vec<Recipe>, DbErr> {
        let txn = self.db.begin().await?;
        let mut ids = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            ids.push(save_aggregate(&txn, recipe).await?);
        }
        let mut saved = Vec::with_capacity(ids.len());
        for id in ids {
            saved.push(load_saved(&txn, id).await?);
        }
        txn.commit().await?;
        Ok(saved)
    }

    #[instrument(skip(self, image), fields(size = image.len()))]
    async fn save_image(&self, id: i32, image: Vec<u8>) -> Result<bool, DbErr> {
        let result = recipe::Entity::update_many()
            .col_expr(recipe::Column::Image, Expr::value(image))
            .filter(recipe::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        recipe_category::Entity::delete_many()
            .filter(recipe_category::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        ingredient::Entity::delete_many()
            .filter(ingredient::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        notes::Entity::delete_many()
            .filter(notes::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        let result = recipe::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmRepository {
    async fn find_by_description(&self, description: &str) -> Result<Option<Category>, DbErr> {
        Ok(category::Entity::find()
            .filter(category::Column::Description.eq(description))
            .one(&self.db)
            .await?
            .map(Category::from))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Category>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(category::Entity::find()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(category::Column::Description)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Category::from)
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Category>, DbErr> {
        Ok(category::Entity::find()
            .order_by_asc(category::Column::Description)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Category::from)
            .collect())
    }
}

#[async_trait]
impl UnitOfMeasureRepository for SeaOrmRepository {
    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<UnitOfMeasure>, DbErr> {
        Ok(unit_of_measure::Entity::find()
            .filter(unit_of_measure::Column::Description.eq(description))
            .one(&self.db)
            .await?
            .map(UnitOfMeasure::from))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UnitOfMeasure>, DbErr> {
        Ok(unit_of_measure::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(UnitOfMeasure::from))
    }

    async fn find_all(&self) -> Result<Vec<UnitOfMeasure>, DbErr> {
        Ok(unit_of_measure::Entity::find()
            .order_by_asc(unit_of_measure::Column::Description)
            .all(&self.db)
            .await?
            .into_iter()
            .map(UnitOfMeasure::from)
            .collect())
    }
}

/// Write one aggregate and return the recipe id.
async fn save_aggregate<C: ConnectionTrait>(conn: &C, recipe: Recipe) -> Result<i32, DbErr> {
    let existing_id = recipe.id;

    let row = recipe::ActiveModel {
        id: existing_id.map_or(NotSet, Set),
        description: Set(recipe.description),
        prep_time: Set(recipe.prep_time),
        cook_time: Set(recipe.cook_time),
        servings: Set(recipe.servings),
        source: Set(recipe.source),
        url: Set(recipe.url),
        directions: Set(recipe.directions),
        difficulty: Set(recipe.difficulty),
        image: Set(recipe.image),
    };
    let id = if existing_id.is_some() {
        row.update(conn).await?.id
    } else {
        row.insert(conn).await?.id
    };

    save_notes(conn, id, recipe.notes).await?;
    save_ingredients(conn, id, recipe.ingredients).await?;
    save_category_links(conn, id, &recipe.categories).await?;

    debug!(recipe_id = id, "Saved recipe aggregate");
    Ok(id)
}

async fn save_notes<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    recipe_notes: Option<Notes>,
) -> Result<(), DbErr> {
    match recipe_notes {
        Some(Notes {
            id: Some(notes_id),
            recipe_notes,
        }) => {
            notes::ActiveModel {
                id: Set(notes_id),
                recipe_notes: Set(recipe_notes),
                recipe_id: Set(recipe_id),
            }
            .update(conn)
            .await?;
        }
        Some(Notes {
            id: None,
            recipe_notes,
        }) => {
            // One notes row per recipe: replace whatever was there.
            notes::Entity::delete_many()
                .filter(notes::Column::RecipeId.eq(recipe_id))
                .exec(conn)
                .await?;
            notes::ActiveModel {
                id: NotSet,
                recipe_notes: Set(recipe_notes),
                recipe_id: Set(recipe_id),
            }
            .insert(conn)
            .await?;
        }
        None => {
            notes::Entity::delete_many()
                .filter(notes::Column::RecipeId.eq(recipe_id))
                .exec(conn)
                .await?;
        }
    }
    Ok(())
}

async fn save_ingredients<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    ingredients: Vec<Ingredient>,
) -> Result<(), DbErr> {
    let kept: Vec<i32> = ingredients.iter().filter_map(|i| i.id).collect();

    let mut removed = ingredient::Entity::delete_many()
        .filter(ingredient::Column::RecipeId.eq(recipe_id));
    if !kept.is_empty() {
        removed = removed.filter(ingredient::Column::Id.is_not_in(kept));
    }
    removed.exec(conn).await?;

    for item in ingredients {
        let row = ingredient::ActiveModel {
            id: item.id.map_or(NotSet, Set),
            description: Set(item.description),
            amount: Set(item.amount),
            recipe_id: Set(recipe_id),
            uom_id: Set(item.uom.map(|u| u.id)),
        };
        if item.id.is_some() {
            row.update(conn).await?;
        } else {
            row.insert(conn).await?;
        }
    }
    Ok(())
}

async fn save_category_links<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    categories: &[Category],
) -> Result<(), DbErr> {
    recipe_category::Entity::delete_many()
        .filter(recipe_category::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;

    let mut category_ids: Vec<i32> = categories.iter().map(|c| c.id).collect();
    category_ids.sort_unstable();
    category_ids.dedup();
    if category_ids.is_empty() {
        return Ok(());
    }

    let links = category_ids
        .into_iter()
        .map(|category_id| recipe_category::ActiveModel {
            recipe_id: Set(recipe_id),
            category_id: Set(category_id),
        });
    recipe_category::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

async fn load_saved<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Recipe, DbErr> {
    let row = recipe::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("recipe {id} missing after save")))?;
    assemble(conn, vec![row])
        .await?
        .pop()
        .ok_or_else(|| DbErr::RecordNotFound(format!("recipe {id} missing after save")))
}

/// Attach notes, ingredients (with units) and categories to recipe rows.
///
/// Issues a fixed number of queries regardless of how many rows are passed.
async fn assemble<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<recipe::Model>,
) -> Result<Vec<Recipe>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let recipe_ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

    let mut notes_by_recipe: HashMap<i32, Notes> = notes::Entity::find()
        .filter(notes::Column::RecipeId.is_in(recipe_ids.clone()))
        .all(conn)
        .await?
        .into_iter()
        .map(|n| {
            (
                n.recipe_id,
                Notes {
                    id: Some(n.id),
                    recipe_notes: n.recipe_notes,
                },
            )
        })
        .collect();

    let ingredient_rows = ingredient::Entity::find()
        .filter(ingredient::Column::RecipeId.is_in(recipe_ids.clone()))
        .order_by_asc(ingredient::Column::Id)
        .all(conn)
        .await?;

    let mut uom_ids: Vec<i32> = ingredient_rows.iter().filter_map(|i| i.uom_id).collect();
    uom_ids.sort_unstable();
    uom_ids.dedup();
    let units: HashMap<i32, UnitOfMeasure> = if uom_ids.is_empty() {
        HashMap::new()
    } else {
        unit_of_measure::Entity::find()
            .filter(unit_of_measure::Column::Id.is_in(uom_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|u| (u.id, UnitOfMeasure::from(u)))
            .collect()
    };

    let mut ingredients_by_recipe: HashMap<i32, Vec<Ingredient>> = HashMap::new();
    for row in ingredient_rows {
        ingredients_by_recipe
            .entry(row.recipe_id)
            .or_default()
            .push(Ingredient {
                id: Some(row.id),
                description: row.description,
                amount: row.amount,
                uom: row.uom_id.and_then(|id| units.get(&id).cloned()),
                recipe_id: Some(row.recipe_id),
            });
    }

    let links = recipe_category::Entity::find()
        .filter(recipe_category::Column::RecipeId.is_in(recipe_ids))
        .all(conn)
        .await?;
    let mut category_ids: Vec<i32> = links.iter().map(|l| l.category_id).collect();
    category_ids.sort_unstable();
    category_ids.dedup();
    let categories: HashMap<i32, Category> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        category::Entity::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|c| (c.id, Category::from(c)))
            .collect()
    };

    let mut categories_by_recipe: HashMap<i32, Vec<Category>> = HashMap::new();
    for link in links {
        if let Some(c) = categories.get(&link.category_id) {
            categories_by_recipe
                .entry(link.recipe_id)
                .or_default()
                .push(c.clone());
        }
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let mut recipe_categories = categories_by_recipe.remove(&row.id).unwrap_or_default();
            recipe_categories.sort_by(|a, b| a.description.cmp(&b.description));
            Recipe {
                id: Some(row.id),
                description: row.description,
                prep_time: row.prep_time,
                cook_time: row.cook_time,
                servings: row.servings,
                source: row.source,
                url: row.url,
                directions: row.directions,
                difficulty: row.difficulty,
                image: row.image,
                notes: notes_by_recipe.remove(&row.id),
                categories: recipe_categories,
                ingredients: ingredients_by_recipe.remove(&row.id).unwrap_or_default(),
            }
        })
        .collect())
}
