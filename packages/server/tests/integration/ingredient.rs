use recipe_server::repository::{RecipeRepository, UnitOfMeasureRepository};
use rust_decimal::Decimal;

use crate::common::{TestApp, routes};

async fn unit_id(app: &TestApp, description: &str) -> i32 {
    app.state
        .units
        .find_by_description(description)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("unit {description} should be seeded"))
        .id
}

mod add {
    use super::*;

    #[tokio::test]
    async fn new_ingredient_redirects_to_its_page() {
        let app = TestApp::spawn().await;
        let recipe_id = app.create_recipe("Soup").await;
        let cup = unit_id(&app, "Cup").await;

        let ingredient_id = app.add_ingredient(recipe_id, "water", "1.5", Some(cup)).await;

        let res = app.get(&routes::ingredient(recipe_id, ingredient_id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.view(), Some("recipe/ingredient/show"));
        assert!(res.text.contains("water"));
        assert!(res.text.contains("1.5"));
        assert!(res.text.contains("Cup"));

        let recipe = app.state.recipes.find_by_id(recipe_id).await.unwrap().unwrap();
        let stored = recipe.ingredient(ingredient_id).unwrap();
        assert_eq!(stored.amount, Decimal::new(15, 1));
        assert_eq!(stored.uom.as_ref().map(|u| u.id), Some(cup));
    }

    #[tokio::test]
    async fn ingredient_without_unit_is_allowed() {
        let app = TestApp::spawn().await;
        let recipe_id = app.create_recipe("Guac").await;

        let ingredient_id = app.add_ingredient(recipe_id, "ripe avocados", "2", None).await;

        let recipe = app.state.recipes.find_by_id(recipe_id).await.unwrap().unwrap();
        assert!(recipe.ingredient(ingredient_id).unwrap().uom.is_none());
    }

    #[tokio::test]
    async fn each_new_ingredient_gets_its_own_id() {
        let app = TestApp::spawn().await;
        let recipe_id = app.create_recipe("Salad").await;

        let first = app.add_ingredient(recipe_id, "lettuce", "1", None).await;
        let second = app.add_ingredient(recipe_id, "tomato", "2", None).await;

        assert_ne!(first, second);
        let res = app.get(&routes::ingredients(recipe_id)).await;
        assert_eq!(res.view(), Some("recipe/ingredient/list"));
        assert!(res.text.contains("lettuce"));
        assert!(res.text.contains("tomato"));
    }

    #[tokio::test]
    async fn empty_form_lists_units() {
        let app = TestApp::spawn().await;
        let recipe_id = app.create_recipe("Bread").await;

        let res = app.get(&routes::new_ingredient(recipe_id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.view(), Some("recipe/ingredient/ingredientform"));
        for unit in ["Teaspoon", "Tablespoon", "Cup", "Pinch", "Dash"] {
            assert!(res.text.contains(unit), "missing unit {unit}");
        }
    }

    #[tokio::test]
    async fn invalid_amount_is_shown_again() {
        let app = TestApp::spawn().await;
        let recipe_id = app.create_recipe("Cake").await;

        let res = app
            .post_form(
                &routes::ingredient_post(recipe_id),
                &[("description", "sugar"), ("amount", "lots")],
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.view(), Some("recipe/ingredient/ingredientform"));
        assert!(res.text.contains(r#"data-field="amount""#));

        let recipe = app.state.recipes.find_by_id(recipe_id).await.unwrap().unwrap();
        assert!(recipe.ingredients.is_empty());
    }

    #[tokio::test]
    async fn unknown_unit_is_a_field_error() {
        let app = TestApp::spawn().await;
        let recipe_id = app.create_recipe("Stew").await;

        let res = app
            .post_form(
                &routes::ingredient_post(recipe_id),
                &[("description", "beef"), ("amount", "1"), ("uom_id", "999")],
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains(r#"data-field="uom_id""#));
    }

    #[tokio::test]
    async fn adding_to_unknown_recipe_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                &routes::ingredient_post(55),
                &[("description", "salt"), ("amount", "1")],
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.view(), Some("404error"));
    }
}

mod edit {
    use super::*;

    #[tokio::test]
    async fn update_changes_only_that_ingredient() {
        let app = TestApp::spawn().await;
        let recipe_id = app.create_recipe("Chili").await;
        let tsp = unit_id(&app, "Teaspoon").await;
        let tbsp = unit_id(&app, "Tablespoon").await;
        let salt = app.add_ingredient(recipe_id, "salt", "1", Some(tsp)).await;
        let cumin = app.add_ingredient(recipe_id, "cumin", "2", Some(tsp)).await;

        let form = app.get(&routes::update_ingredient(recipe_id, salt)).await;
        assert_eq!(form.status, 200);
        assert!(form.text.contains(r#"value="salt""#));

        let salt_field = salt.to_string();
        let tbsp_field = tbsp.to_string();
        let res = app
            .post_form(
                &routes::ingredient_post(recipe_id),
                &[
                    ("id", salt_field.as_str()),
                    ("description", "sea salt"),
                    ("amount", "0.5"),
                    ("uom_id", tbsp_field.as_str()),
                ],
            )
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location(), routes::ingredient(recipe_id, salt));

        let recipe = app.state.recipes.find_by_id(recipe_id).await.unwrap().unwrap();
        assert_eq!(recipe.ingredients.len(), 2);
        let updated = recipe.ingredient(salt).unwrap();
        assert_eq!(updated.description, "sea salt");
        assert_eq!(updated.amount, Decimal::new(5, 1));
        assert_eq!(updated.uom.as_ref().map(|u| u.id), Some(tbsp));
        let untouched = recipe.ingredient(cumin).unwrap();
        assert_eq!(untouched.description, "cumin");
    }

    #[tokio::test]
    async fn showing_ingredient_of_other_recipe_is_not_found() {
        let app = TestApp::spawn().await;
        let owner = app.create_recipe("Owner").await;
        let other = app.create_recipe("Other").await;
        let ingredient_id = app.add_ingredient(owner, "pepper", "1", None).await;

        let res = app.get(&routes::ingredient(other, ingredient_id)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.view(), Some("404error"));
    }

    #[tokio::test]
    async fn non_numeric_ingredient_id_is_bad_request() {
        let app = TestApp::spawn().await;
        let recipe_id = app.create_recipe("Paths").await;

        let res = app
            .get(&format!("/recipe/{recipe_id}/ingredient/xyz/show"))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.view(), Some("400error"));
    }
}

mod remove {
    use super::*;

    #[tokio::test]
    async fn delete_redirects_to_list() {
        let app = TestApp::spawn().await;
        let recipe_id = app.create_recipe("Trim").await;
        let gone = app.add_ingredient(recipe_id, "garnish", "1", None).await;
        let kept = app.add_ingredient(recipe_id, "base", "1", None).await;

        let res = app.get(&routes::delete_ingredient(recipe_id, gone)).await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location(), routes::ingredients(recipe_id));

        let recipe = app.state.recipes.find_by_id(recipe_id).await.unwrap().unwrap();
        let ids: Vec<Option<i32>> = recipe.ingredients.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![Some(kept)]);
    }

    #[tokio::test]
    async fn deleting_missing_ingredient_is_not_found() {
        let app = TestApp::spawn().await;
        let recipe_id = app.create_recipe("Nothing").await;

        let res = app.get(&routes::delete_ingredient(recipe_id, 9999)).await;

        assert_eq!(res.status, 404);
    }
}
