use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatbridge_api::{
    app::build_router,
    config::{Config, StorageBackend},
    state::AppState,
};
use chatbridge_llm::{HuggingFaceClient, InferenceClient};
use chatbridge_persist::{ExchangeStore, InMemoryExchangeStore, MongoExchangeStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting chatbridge relay");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize inference client
    tracing::info!("Initializing inference client for {}", config.inference.model_url);
    let mut inference_builder = HuggingFaceClient::builder().model_url(&config.inference.model_url);
    if let Some(api_key) = &config.huggingface_api_key {
        inference_builder = inference_builder.api_key(api_key);
    }
    let inference = inference_builder.build()?;
    if !inference.is_configured() {
        tracing::warn!("HUGGINGFACE_API_KEY is not set; every chat turn will fail until it is");
    }
    let inference: Arc<dyn InferenceClient> = Arc::new(inference);

    // Initialize exchange store
    let store: Arc<dyn ExchangeStore> = match config.storage.backend {
        StorageBackend::MongoDb => {
            tracing::info!("Connecting to MongoDB");
            let store = MongoExchangeStore::builder()
                .mongodb_uri(&config.mongodb_uri)
                .database(&config.mongodb.database)
                .build()
                .await?;
            tracing::info!("MongoDB connected");
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory exchange store; exchanges are lost on restart");
            Arc::new(InMemoryExchangeStore::new())
        }
    };

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), inference, store));

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Chat socket: ws://{}/ws/chat", addr);
    tracing::info!("API docs: http://{}/api/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
