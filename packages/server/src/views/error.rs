use super::{Page, render};

const ERROR: &str = include_str!("../../templates/error.html");

pub fn bad_request(message: &str) -> Page {
    page("400error", "Bad Request", message)
}

pub fn not_found(message: &str) -> Page {
    page("404error", "Not Found", message)
}

pub fn internal() -> Page {
    page(
        "500error",
        "Internal Server Error",
        "An unexpected error occurred",
    )
}

fn page(view: &'static str, heading: &str, message: &str) -> Page {
    let content = render(ERROR, &[("heading", heading.into()), ("message", message.into())]);
    Page::new(view, heading, content)
}
