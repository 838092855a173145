use common::Difficulty;

use super::{Page, error_summary, escape, field_error, html, render};
use crate::models::shared::FieldErrors;
use crate::models::{Category, Recipe, RecipeForm};

const INDEX: &str = include_str!("../../templates/index.html");
const SHOW: &str = include_str!("../../templates/recipe/show.html");
const FORM: &str = include_str!("../../templates/recipe/recipeform.html");
const IMAGE_UPLOAD_FORM: &str = include_str!("../../templates/recipe/imageuploadform.html");

pub fn index(recipes: &[Recipe]) -> Page {
    let rows: String = recipes
        .iter()
        .filter_map(|r| r.id.map(|id| (id, r)))
        .map(|(id, r)| {
            format!(
                "<tr><td>{id}</td><td>{}</td><td>{}</td>\
                 <td><a href=\"/recipe/{id}/show\">View</a></td>\
                 <td><a href=\"/recipe/{id}/update\">Update</a></td>\
                 <td><a href=\"/recipe/{id}/delete\">Delete</a></td></tr>\n",
                escape(&r.description),
                r.difficulty.label(),
            )
        })
        .collect();

    Page::new("index", "Recipe Home", render(INDEX, &[("rows", html(rows))]))
}

pub fn show(recipe: &Recipe) -> Page {
    let id = recipe.id.unwrap_or_default();

    let image = if recipe.has_image() {
        format!(r#"<img class="recipe-image" src="/recipe/{id}/recipeimage" alt="Recipe image">"#)
    } else {
        String::new()
    };

    let categories: String = recipe
        .categories
        .iter()
        .map(|c| format!("<li>{}</li>", escape(&c.description)))
        .collect();

    let ingredients: String = recipe
        .ingredients
        .iter()
        .map(|i| {
            let uom = i.uom.as_ref().map(|u| u.description.as_str()).unwrap_or("");
            format!(
                "<li>{} {} {}</li>",
                i.amount.normalize(),
                escape(uom),
                escape(&i.description)
            )
        })
        .collect();

    let url = if recipe.url.is_empty() {
        String::new()
    } else {
        let url = escape(&recipe.url);
        format!(r#"<a href="{url}">{url}</a>"#)
    };

    let notes = recipe
        .notes
        .as_ref()
        .map(|n| n.recipe_notes.as_str())
        .unwrap_or("");

    let content = render(
        SHOW,
        &[
            ("id", id.into()),
            ("description", recipe.description.as_str().into()),
            ("image", html(image)),
            ("categories", html(categories)),
            ("prep_time", recipe.prep_time.into()),
            ("cook_time", recipe.cook_time.into()),
            ("difficulty", recipe.difficulty.label().into()),
            ("servings", recipe.servings.into()),
            ("source", recipe.source.as_str().into()),
            ("url", html(url)),
            ("ingredients", html(ingredients)),
            ("directions", recipe.directions.as_str().into()),
            ("notes", notes.into()),
        ],
    );

    Page::new("recipe/show", recipe.description.clone(), content)
}

/// Create/edit form, optionally with the errors of a rejected submission.
pub fn form(form: &RecipeForm, categories: &[Category], errors: &FieldErrors) -> Page {
    let category_boxes: String = categories
        .iter()
        .map(|c| {
            let checked = if form.categories.contains(&c.id) {
                " checked"
            } else {
                ""
            };
            format!(
                r#"<label><input type="checkbox" name="categories" value="{}"{checked}> {}</label>"#,
                c.id,
                escape(&c.description)
            )
        })
        .collect();

    let selected = form.difficulty.parse::<Difficulty>().unwrap_or_default();
    let difficulties: String = Difficulty::ALL
        .iter()
        .map(|d| {
            let attr = if *d == selected { " selected" } else { "" };
            format!(r#"<option value="{}"{attr}>{}</option>"#, d.as_str(), d.label())
        })
        .collect();

    let heading = if form.id.is_some() {
        "Edit Recipe"
    } else {
        "New Recipe"
    };
    let id = form.id.map(|id| id.to_string()).unwrap_or_default();

    let content = render(
        FORM,
        &[
            ("heading", heading.into()),
            ("summary", html(error_summary(errors))),
            ("id", id.into()),
            ("description", form.description.as_str().into()),
            ("description_error", html(field_error(errors, "description"))),
            ("categories", html(category_boxes)),
            ("categories_error", html(field_error(errors, "categories"))),
            ("prep_time", form.prep_time.as_str().into()),
            ("prep_time_error", html(field_error(errors, "prep_time"))),
            ("cook_time", form.cook_time.as_str().into()),
            ("cook_time_error", html(field_error(errors, "cook_time"))),
            ("difficulties", html(difficulties)),
            ("difficulty_error", html(field_error(errors, "difficulty"))),
            ("servings", form.servings.as_str().into()),
            ("servings_error", html(field_error(errors, "servings"))),
            ("source", form.source.as_str().into()),
            ("url", form.url.as_str().into()),
            ("url_error", html(field_error(errors, "url"))),
            ("directions", form.directions.as_str().into()),
            ("directions_error", html(field_error(errors, "directions"))),
            ("notes", form.notes.as_str().into()),
        ],
    );

    Page::new("recipe/recipeform", heading, content)
}

pub fn image_upload_form(recipe: &Recipe) -> Page {
    let content = render(
        IMAGE_UPLOAD_FORM,
        &[
            ("id", recipe.id.unwrap_or_default().into()),
            ("description", recipe.description.as_str().into()),
        ],
    );
    Page::new("recipe/imageuploadform", "Upload image", content)
}
