pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod router;
pub mod services;
pub mod state;

use std::net::SocketAddr;

use utoipa_scalar::{Scalar, Servable};

pub use config::{Config, ConfigError, Environment};
pub use db::create_pool;
pub use error::{AppError, AppResult};
pub use router::create_router;
pub use services::{BatchReport, IngestError, IngestService, SkipReason, SkippedQuery};
pub use state::AppState;

pub async fn run_server(
    addr: SocketAddr,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = create_pool(&config.database_url, config.max_connections).await?;
    let state = AppState::new(pool, config)?;

    let (router, api) = create_router(state);
    let app = router.merge(Scalar::with_url("/docs", api));

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
