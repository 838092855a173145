use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::reference::UnitOfMeasure;
use super::shared::{FieldErrors, empty_string_as_none, validate_text};

/// One line of a recipe's ingredient list.
#[derive(Clone, Debug, PartialEq)]
pub struct Ingredient {
    /// `None` until persisted.
    pub id: Option<i32>,
    pub description: String,
    pub amount: Decimal,
    pub uom: Option<UnitOfMeasure>,
    /// Owning recipe. Set by [`super::recipe::Recipe::add_ingredient`] and on save.
    pub recipe_id: Option<i32>,
}

impl Ingredient {
    pub fn new(description: impl Into<String>, amount: Decimal, uom: Option<&UnitOfMeasure>) -> Self {
        Self {
            id: None,
            description: description.into(),
            amount,
            uom: uom.cloned(),
            recipe_id: None,
        }
    }
}

/// Ingredient create/edit form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct IngredientForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub uom_id: Option<i32>,
}

/// An [`IngredientForm`] that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientFields {
    pub description: String,
    pub amount: Decimal,
    pub uom_id: Option<i32>,
}

impl IngredientForm {
    pub fn validate(&self) -> Result<IngredientFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        validate_text(&mut errors, "description", &self.description, 1, 255);

        let amount = match Decimal::from_str(self.amount.trim()) {
            Ok(a) if a.is_sign_negative() => {
                errors.push("amount", "must not be negative");
                Decimal::ZERO
            }
            Ok(a) => a.normalize(),
            Err(_) => {
                errors.push("amount", "must be a decimal number");
                Decimal::ZERO
            }
        };

        errors.into_result(IngredientFields {
            description: self.description.trim().to_string(),
            amount,
            uom_id: self.uom_id,
        })
    }
}

impl From<&Ingredient> for IngredientForm {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id,
            description: ingredient.description.clone(),
            amount: ingredient.amount.normalize().to_string(),
            uom_id: ingredient.uom.as_ref().map(|u| u.id),
        }
    }
}

/// Response DTO for a single ingredient.
#[derive(Serialize, utoipa::ToSchema)]
pub struct IngredientResponse {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = "kosher salt")]
    pub description: String,
    #[schema(value_type = String, example = "0.25")]
    pub amount: Decimal,
    pub uom: Option<UnitOfMeasure>,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id.unwrap_or_default(),
            description: ingredient.description,
            amount: ingredient.amount.normalize(),
            uom: ingredient.uom,
        }
    }
}
