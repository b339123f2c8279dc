use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use gbooks::GbooksClient;
use ingest::GbooksSource;

use crate::config::Config;
use crate::services::IngestService;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub ingest: Arc<IngestService>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Result<Self, reqwest::Error> {
        // Bounded timeouts so one stalled lookup cannot wedge a batch
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let gbooks = match &config.gbooks_api_key {
            Some(key) => GbooksClient::with_api_key(http_client, key),
            None => GbooksClient::new(http_client),
        };
        let source = Arc::new(GbooksSource::new(Arc::new(gbooks)));
        let ingest = Arc::new(IngestService::new(db.clone(), source));

        Ok(Self {
            db,
            config: Arc::new(config),
            ingest,
        })
    }
}
