use crate::config::Config;
use crate::services::AiClient;
use crate::store::ProductStore;
use crate::templates::TemplateEngine;
use anyhow::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ai: Arc<AiClient>,
    pub store: Arc<ProductStore>,
    pub templates: Arc<TemplateEngine>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        tracing::info!("[STATE] Initializing AppState...");
        tracing::info!("[STATE]   Provider model: {}", config.gemini_model);
        tracing::info!("[STATE]   Upload dir: {}", config.upload_dir.display());
        tracing::info!("[STATE]   Products file: {}", config.products_path.display());

        let ai = AiClient::new(&config)?;

        let store = ProductStore::new(&config.products_path);
        store.initialize()?;

        std::fs::create_dir_all(&config.upload_dir)?;

        let templates = TemplateEngine::new()?;

        Ok(Self {
            config: Arc::new(config),
            ai: Arc::new(ai),
            store: Arc::new(store),
            templates: Arc::new(templates),
        })
    }
}
