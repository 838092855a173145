//! Server-rendered HTML pages.
//!
//! Templates are compiled into the binary and filled by [`render`]. Every page
//! is wrapped in the shared layout, which records the view name in
//! `<body data-view="...">`.

pub mod error;
pub mod ingredient;
pub mod recipe;

use std::borrow::Cow;

use axum::response::{Html, IntoResponse, Response};

use crate::models::shared::FieldErrors;

const LAYOUT: &str = include_str!("../../templates/layout.html");

/// A placeholder value.
pub enum Value<'a> {
    /// Escaped before insertion.
    Text(Cow<'a, str>),
    /// Inserted as-is. Only for markup built by this module.
    Html(Cow<'a, str>),
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Text(Cow::Owned(s))
    }
}

impl From<i32> for Value<'_> {
    fn from(n: i32) -> Self {
        Value::Text(Cow::Owned(n.to_string()))
    }
}

pub fn html<'a>(markup: impl Into<Cow<'a, str>>) -> Value<'a> {
    Value::Html(markup.into())
}

pub fn escape(s: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(s)
}

/// Replace each `{{key}}` in `template` with its value.
///
/// Substituted values are never scanned again, so user text containing
/// `{{...}}` is printed literally. Unknown keys render as nothing.
pub fn render(template: &str, vars: &[(&str, Value<'_>)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = after[..end].trim();
        match vars.iter().find(|(k, _)| *k == key) {
            Some((_, Value::Text(s))) => out.push_str(&escape(s)),
            Some((_, Value::Html(s))) => out.push_str(s),
            None => tracing::debug!(key, "Template placeholder without value"),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// A rendered page body plus the layout fields around it.
pub struct Page {
    pub view: &'static str,
    pub title: String,
    pub content: String,
}

impl Page {
    pub fn new(view: &'static str, title: impl Into<String>, content: String) -> Self {
        Self {
            view,
            title: title.into(),
            content,
        }
    }

    pub fn into_html(self) -> String {
        render(
            LAYOUT,
            &[
                ("title", self.title.into()),
                ("view", self.view.into()),
                ("content", html(self.content)),
            ],
        )
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        Html(self.into_html()).into_response()
    }
}

/// Inline error message for one form field, empty when the field is valid.
pub(crate) fn field_error(errors: &FieldErrors, field: &str) -> String {
    errors
        .get(field)
        .map(|msg| {
            format!(
                r#"<span class="error" data-field="{field}">{}</span>"#,
                escape(msg)
            )
        })
        .unwrap_or_default()
}

pub(crate) fn error_summary(errors: &FieldErrors) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}: {}</li>", e.field, escape(&e.message)))
        .collect();
    format!(r#"<div class="error"><p>Please correct the errors below.</p><ul>{items}</ul></div>"#)
}
