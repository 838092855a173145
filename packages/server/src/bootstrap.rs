//! Sample recipes inserted once at startup.

use common::Difficulty;
use rust_decimal::Decimal;
use sea_orm::DbErr;
use tracing::info;

use crate::models::{Category, Ingredient, Notes, Recipe, UnitOfMeasure};
use crate::repository::{CategoryRepository, RecipeRepository, UnitOfMeasureRepository};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("expected unit of measure '{0}' not found")]
    MissingUnitOfMeasure(String),

    #[error("expected category '{0}' not found")]
    MissingCategory(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Look up the reference data, build the sample recipes and save them in
/// one batch.
///
/// Fails before anything is written if a unit or category is missing. Not
/// idempotent: every call inserts two more recipes.
pub async fn run(
    recipes: &dyn RecipeRepository,
    categories: &dyn CategoryRepository,
    units: &dyn UnitOfMeasureRepository,
) -> Result<Vec<Recipe>, BootstrapError> {
    let teaspoon = unit(units, "Teaspoon").await?;
    let tablespoon = unit(units, "Tablespoon").await?;
    let cup = unit(units, "Cup").await?;
    let pinch = unit(units, "Pinch").await?;
    // Looked up to verify the reference data, no sample ingredient uses it.
    let _ounce = unit(units, "Ounce").await?;
    let pint = unit(units, "Pint").await?;

    let american = category(categories, "American").await?;
    let mexican = category(categories, "Mexican").await?;

    let samples = vec![
        perfect_guacamole(&american, &mexican, &tablespoon, &pinch),
        spicy_grilled_chicken_tacos(&mexican, &teaspoon, &tablespoon, &cup, &pint),
    ];

    let saved = recipes.save_all(samples).await?;
    info!(count = saved.len(), "Loaded sample recipes");
    Ok(saved)
}

async fn unit(
    units: &dyn UnitOfMeasureRepository,
    description: &str,
) -> Result<UnitOfMeasure, BootstrapError> {
    units
        .find_by_description(description)
        .await?
        .ok_or_else(|| BootstrapError::MissingUnitOfMeasure(description.to_string()))
}

async fn category(
    categories: &dyn CategoryRepository,
    description: &str,
) -> Result<Category, BootstrapError> {
    categories
        .find_by_description(description)
        .await?
        .ok_or_else(|| BootstrapError::MissingCategory(description.to_string()))
}

fn quarter() -> Decimal {
    Decimal::new(25, 2)
}

fn half() -> Decimal {
    Decimal::new(5, 1)
}

fn perfect_guacamole(
    american: &Category,
    mexican: &Category,
    tablespoon: &UnitOfMeasure,
    pinch: &UnitOfMeasure,
) -> Recipe {
    let mut recipe = Recipe {
        description: "Perfect Guacamole".into(),
        prep_time: 10,
        cook_time: 0,
        servings: 4,
        source: "Simply Recipes".into(),
        url: "https://www.simplyrecipes.com/recipes/perfect_guacamole/".into(),
        difficulty: Difficulty::Easy,
        directions: GUACAMOLE_DIRECTIONS.into(),
        notes: Some(Notes::new("This is yummy.")),
        ..Default::default()
    };

    recipe
        .add_category(american.clone())
        .add_category(mexican.clone());

    recipe
        .add_ingredient(Ingredient::new("ripe avocados", Decimal::from(2), None))
        .add_ingredient(Ingredient::new("kosher salt", quarter(), Some(tablespoon)))
        .add_ingredient(Ingredient::new(
            "fresh lime or lemon juice",
            Decimal::ONE,
            Some(tablespoon),
        ))
        .add_ingredient(Ingredient::new(
            "minced red onion or thinly sliced green onion",
            Decimal::from(4),
            Some(tablespoon),
        ))
        .add_ingredient(Ingredient::new(
            "serrano or jalapeno chilis, stems and seeds removed, minced",
            Decimal::from(2),
            None,
        ))
        .add_ingredient(Ingredient::new(
            "cilantro (leaves and tender stems), finely chopped",
            Decimal::from(2),
            Some(tablespoon),
        ))
        .add_ingredient(Ingredient::new(
            "freshly ground black pepper",
            Decimal::ONE,
            Some(pinch),
        ))
        .add_ingredient(Ingredient::new(
            "ripe tomato, chopped (optional)",
            half(),
            None,
        ))
        .add_ingredient(Ingredient::new(
            "red radish or jicama slices for garnish",
            Decimal::ZERO,
            None,
        ))
        .add_ingredient(Ingredient::new("tortilla chips", Decimal::ZERO, None));

    recipe
}

fn spicy_grilled_chicken_tacos(
    mexican: &Category,
    teaspoon: &UnitOfMeasure,
    tablespoon: &UnitOfMeasure,
    cup: &UnitOfMeasure,
    pint: &UnitOfMeasure,
) -> Recipe {
    let mut recipe = Recipe {
        description: "Spicy Grilled Chicken Tacos".into(),
        prep_time: 20,
        cook_time: 15,
        servings: 6,
        source: "Simply Recipes".into(),
        url: "https://www.simplyrecipes.com/recipes/spicy_grilled_chicken_tacos/".into(),
        difficulty: Difficulty::Moderate,
        directions: TACOS_DIRECTIONS.into(),
        notes: Some(Notes::new(
            "Meat is murder. Replace chicken with vegan alternative.",
        )),
        ..Default::default()
    };

    recipe.add_category(mexican.clone());

    let items: [(&str, Decimal, Option<&UnitOfMeasure>); 20] = [
        ("ancho chili powder", Decimal::from(2), Some(tablespoon)),
        ("dried oregano", Decimal::ONE, Some(teaspoon)),
        ("dried cumin", Decimal::ONE, Some(teaspoon)),
        ("sugar", Decimal::ONE, Some(teaspoon)),
        ("kosher salt", half(), Some(teaspoon)),
        ("clove garlic, finely chopped", Decimal::ONE, None),
        ("finely grated orange zest", Decimal::ONE, Some(tablespoon)),
        ("fresh-squeezed orange juice", Decimal::from(3), Some(tablespoon)),
        ("olive oil", Decimal::from(2), Some(tablespoon)),
        ("skinless, boneless chicken thighs", Decimal::from(6), None),
        ("small corn tortillas", Decimal::from(8), None),
        ("packed baby arugula", Decimal::from(3), Some(cup)),
        ("medium ripe avocados, sliced", Decimal::from(2), None),
        ("radishes, thinly sliced", Decimal::from(4), None),
        ("cherry tomatoes, halved", half(), Some(pint)),
        ("red onion, thinly sliced", quarter(), None),
        ("roughly chopped cilantro", Decimal::ONE, None),
        ("sour cream", half(), Some(cup)),
        ("milk", quarter(), Some(cup)),
        ("lime, cut into wedges", Decimal::ONE, None),
    ];
    for (description, amount, uom) in items {
        recipe.add_ingredient(Ingredient::new(description, amount, uom));
    }

    recipe
}

const GUACAMOLE_DIRECTIONS: &str = "\
Cut the avocados:
Cut the avocados in half. Remove the pit. Score the inside of the avocado with a blunt knife and scoop out the flesh with a spoon. (See How to Cut and Peel an Avocado.) Place in a bowl.

How to make guacamole - scoring avocado
Mash the avocado flesh:
Using a fork, roughly mash the avocado. (Don't overdo it! The guacamole should be a little chunky.)

How to make guacamole - smashing avocado with fork
Add the remaining ingredients to taste:
Sprinkle with salt and lime (or lemon) juice. The acid in the lime juice will provide some balance to the richness of the avocado and will help delay the avocados from turning brown.

Add the chopped onion, cilantro, black pepper, and chilis. Chili peppers vary individually in their spiciness. So, start with a half of one chili pepper and add more to the guacamole to your desired degree of heat.

Remember that much of this is done to taste because of the variability in the fresh ingredients. Start with this recipe and adjust to your taste.

Serve immediately:
If making a few hours ahead, place plastic wrap on the surface of the guacamole and press down to cover it to prevent air reaching it. (The oxygen in the air causes oxidation which will turn the guacamole brown.)

Garnish with slices of red radish or jigama strips. Serve with your choice of store-bought tortilla chips or make your own homemade tortilla chips.

Refrigerate leftover guacamole up to 3 days.

Note: Chilling tomatoes hurts their flavor. So, if you want to add chopped tomato to your guacamole, add it just before serving.";

const TACOS_DIRECTIONS: &str = "\
Prepare the grill:
Prepare either a gas or charcoal grill for medium-high, direct heat.

Make the marinade and coat the chicken:
In a large bowl, stir together the chili powder, oregano, cumin, sugar, salt, garlic and orange zest. Stir in the orange juice and olive oil to make a loose paste. Add the chicken to the bowl and toss to coat all over.

Set aside to marinate while the grill heats and you prepare the rest of the toppings.

Spicy Grilled Chicken Tacos
Grill the chicken:
Grill the chicken for 3 to 4 minutes per side, or until a thermometer inserted into the thickest part of the meat registers 165°F. Transfer to a plate and rest for 5 minutes.

Thin the sour cream with milk:
Stir together the sour cream and milk to thin out the sour cream to make it easy to drizzle.

Assemble the tacos:
Slice the chicken into strips. On each tortilla, place a small handful of arugula. Top with chicken slices, sliced avocado, radishes, tomatoes, and onion slices. Drizzle with the thinned sour cream. Serve with lime wedges.

Warm the tortillas:
Place each tortilla on the grill or on a hot, dry skillet over medium-high heat. As soon as you see pockets of the air start to puff up in the tortilla, turn it with tongs and heat for a few seconds on the other side.

Wrap warmed tortillas in a tea towel to keep them warm until serving.";
