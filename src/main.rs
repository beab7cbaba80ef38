//! Bookshelf server: reads `.env` and the environment, opens the configured store, serves the API.

use bookshelf::{app, AppConfig, AppState, Backend, MemoryStore, PgStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookshelf=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let state = match &config.backend {
        Backend::Postgres(db) => {
            tracing::info!(database = %db.redacted_url(), "connecting");
            AppState::new(PgStore::connect(db).await?)
        }
        Backend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            AppState::new(MemoryStore::new())
        }
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
