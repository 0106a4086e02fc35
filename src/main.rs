use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};

use team_registry::api::{self, AppState};
use team_registry::config::{Config, StoreBackend};
use team_registry::domain::document::DocumentStore;
use team_registry::infrastructure::repositories::RemoteTeamRepository;
use team_registry::infrastructure::stores::{MemoryDocumentStore, PostgresDocumentStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    let store: Arc<dyn DocumentStore> = match config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on exit");
            Arc::new(MemoryDocumentStore::new())
        }
        StoreBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;

            let store = PostgresDocumentStore::new(pool);
            store.ensure_schema().await?;
            tracing::info!("Database connected successfully");
            Arc::new(store)
        }
    };

    let teams = Arc::new(RemoteTeamRepository::from_store(store));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(AppState::new(teams)).layer(cors);

    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
