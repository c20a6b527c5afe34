mod auth;
mod config;
mod db;
mod errors;
mod models;
mod parser_client;
mod products;
mod resumes;
mod routes;
mod sessions;
mod state;
mod storage;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::parser_client::{HttpResumeParser, PARSE_TIMEOUT};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::ObjectStorage;
use crate::store::postgres::{PgProductStore, PgResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; only DATABASE_URL is mandatory
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Bonga API v{}", env!("CARGO_PKG_VERSION"));

    if config.uses_default_secret() {
        warn!("API_KEY is not set: gated routes accept the built-in default key and resume parsing is disabled");
    }

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize S3 / MinIO. Failure leaves upload URLs unavailable, nothing else.
    let storage = ObjectStorage::connect(&config.storage).await;

    // Initialize parser client
    let parser = HttpResumeParser::new(config.parser_base_url.clone(), PARSE_TIMEOUT)?;
    info!("Parser client initialized ({})", config.parser_base_url);

    // Build app state
    let state = AppState {
        products: Arc::new(PgProductStore::new(db.clone())),
        resumes: Arc::new(PgResumeStore::new(db)),
        parser: Arc::new(parser),
        storage,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
