use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use artisan_hub::{config, state, web};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artisan_hub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting Artisan Hub");

    // .env is optional; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    // Load configuration
    let config = config::Config::from_env()?;

    // Create application state (provider client, product store, templates)
    let app_state = state::AppState::new(config)?;

    // Start web server
    web::start_server(app_state).await?;

    Ok(())
}
