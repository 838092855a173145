use super::{Page, error_summary, escape, field_error, html, render};
use crate::models::shared::FieldErrors;
use crate::models::{Ingredient, IngredientForm, UnitOfMeasure};

const LIST: &str = include_str!("../../templates/recipe/ingredient/list.html");
const SHOW: &str = include_str!("../../templates/recipe/ingredient/show.html");
const FORM: &str = include_str!("../../templates/recipe/ingredient/ingredientform.html");

pub fn list(recipe_id: i32, ingredients: &[Ingredient]) -> Page {
    let rows: String = ingredients
        .iter()
        .filter_map(|i| i.id.map(|id| (id, i)))
        .map(|(id, i)| {
            format!(
                "<tr><td>{id}</td><td>{}</td>\
                 <td><a href=\"/recipe/{recipe_id}/ingredient/{id}/show\">View</a></td>\
                 <td><a href=\"/recipe/{recipe_id}/ingredient/{id}/update\">Update</a></td>\
                 <td><a href=\"/recipe/{recipe_id}/ingredient/{id}/delete\">Delete</a></td></tr>\n",
                escape(&summary(i)),
            )
        })
        .collect();

    let content = render(
        LIST,
        &[("recipe_id", recipe_id.into()), ("rows", html(rows))],
    );
    Page::new("recipe/ingredient/list", "Ingredients", content)
}

pub fn show(recipe_id: i32, ingredient: &Ingredient) -> Page {
    let uom = ingredient
        .uom
        .as_ref()
        .map(|u| u.description.as_str())
        .unwrap_or("");
    let content = render(
        SHOW,
        &[
            ("recipe_id", recipe_id.into()),
            ("id", ingredient.id.unwrap_or_default().into()),
            ("amount", ingredient.amount.normalize().to_string().into()),
            ("uom", uom.into()),
            ("description", ingredient.description.as_str().into()),
        ],
    );
    Page::new("recipe/ingredient/show", ingredient.description.clone(), content)
}

pub fn form(
    recipe_id: i32,
    form: &IngredientForm,
    units: &[UnitOfMeasure],
    errors: &FieldErrors,
) -> Page {
    let mut options = String::from(r#"<option value="">(none)</option>"#);
    for u in units {
        let attr = if form.uom_id == Some(u.id) {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            r#"<option value="{}"{attr}>{}</option>"#,
            u.id,
            escape(&u.description)
        ));
    }

    let heading = if form.id.is_some() {
        "Edit Ingredient"
    } else {
        "New Ingredient"
    };
    let id = form.id.map(|id| id.to_string()).unwrap_or_default();

    let content = render(
        FORM,
        &[
            ("heading", heading.into()),
            ("summary", html(error_summary(errors))),
            ("recipe_id", recipe_id.into()),
            ("id", id.into()),
            ("description", form.description.as_str().into()),
            ("description_error", html(field_error(errors, "description"))),
            ("amount", form.amount.as_str().into()),
            ("amount_error", html(field_error(errors, "amount"))),
            ("units", html(options)),
            ("uom_id_error", html(field_error(errors, "uom_id"))),
        ],
    );
    Page::new("recipe/ingredient/ingredientform", heading, content)
}

fn summary(ingredient: &Ingredient) -> String {
    match &ingredient.uom {
        Some(uom) => format!(
            "{} {} {}",
            ingredient.amount.normalize(),
            uom.description,
            ingredient.description
        ),
        None => format!("{} {}", ingredient.amount.normalize(), ingredient.description),
    }
}
