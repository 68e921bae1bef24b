use campus_portal::{
    AppState, ChatCompletionClient, InMemoryRepository, LibraryState, RepositoryState,
    chat::ChatState,
    config::{AppConfig, Env},
    create_router, data,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point, responsible for initializing all core
/// components: configuration, logging, the seeded data store, the chat
/// client, and the HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Prioritizes RUST_LOG, falling back to sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "campus_portal=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    // Pretty output for local debugging; JSON for production log ingestion.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Data Store Initialization
    // The user collection lives in process memory, seeded with the fixture
    // records; everything resets on restart.
    let repo = Arc::new(InMemoryRepository::new(data::seed_users())) as RepositoryState;

    // 5. External Service & Fixture Handles
    let chat = Arc::new(ChatCompletionClient::new(&config)) as ChatState;
    let library = Arc::new(data::library_data()) as LibraryState;

    // 6. Unified State Assembly
    let app_state = AppState {
        repo,
        chat,
        library,
        config: config.clone(),
    };

    // 7. Router and Server Startup
    let app = create_router(app_state);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("FATAL: failed to bind the HTTP listener");

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly");
}
