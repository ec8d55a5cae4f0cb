//! Pure template renders, no business logic.

use crate::state::AppState;
use axum::{extract::State, response::Html};
use minijinja::{context, Value};

/// Render a page template, falling back to an inline error page so a
/// missing template never takes a request down.
pub(crate) fn render_page(state: &AppState, name: &str, ctx: Value) -> Html<String> {
    match state.templates.render(name, ctx) {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::error!("failed to render {}: {:?}", name, e);
            Html(format!(
                r#"<!DOCTYPE html>
<html>
<head><title>Error</title></head>
<body>
    <h1>Error loading page</h1>
    <p>Please ensure {name} exists in the templates directory.</p>
</body>
</html>"#
            ))
        }
    }
}

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    render_page(&state, "chat.html", context! {})
}

pub async fn chat(State(state): State<AppState>) -> Html<String> {
    render_page(&state, "chat.html", context! {})
}

pub async fn events(State(state): State<AppState>) -> Html<String> {
    render_page(&state, "events.html", context! {})
}

pub async fn add_product(State(state): State<AppState>) -> Html<String> {
    render_page(&state, "addprod.html", context! {})
}

pub async fn settings(State(state): State<AppState>) -> Html<String> {
    render_page(&state, "settings.html", context! {})
}

pub async fn history(State(state): State<AppState>) -> Html<String> {
    render_page(&state, "history.html", context! {})
}

pub async fn ai(State(state): State<AppState>) -> Html<String> {
    render_page(&state, "ai.html", context! {})
}
