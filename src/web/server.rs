use crate::state::AppState;
use axum::Router;
use std::net::SocketAddr;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let app = create_app(state.clone());

    let addr: SocketAddr = format!("{}:{}", state.config.host, state.config.port).parse()?;
    tracing::info!("🌐 Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn create_app(state: AppState) -> Router {
    // Serve the same directory the upload handler writes to, so the
    // /static/uploads/<name> URLs it hands out always resolve.
    let uploads = ServeDir::new(state.config.upload_dir.clone());
    Router::new()
        .merge(crate::web::routes::create_routes(state))
        .nest_service("/static/uploads", uploads)
        .layer(TraceLayer::new_for_http())
        .layer(crate::web::middleware::cors_layer())
}
