use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(super::handlers::pages::dashboard))
        .route("/chat.html", get(super::handlers::pages::chat))
        .route("/events.html", get(super::handlers::pages::events))
        .route("/Addprod.html", get(super::handlers::pages::add_product))
        .route("/settings.html", get(super::handlers::pages::settings))
        .route("/charts.html", get(super::handlers::pages::history))
        .route("/AI.html", get(super::handlers::pages::ai))
        .route(
            "/ai-chat",
            get(super::handlers::chat::ai_chat_page).post(super::handlers::chat::ai_chat_submit),
        )

        // API endpoints
        .route("/api/chat", post(super::handlers::chat::api_chat))
        .route("/api/save-product", post(super::handlers::products::save_product))
        .route("/api/get-products", get(super::handlers::products::get_products))

        // Health check
        .route("/health", get(super::handlers::health::health_check))

        .with_state(state)
}
