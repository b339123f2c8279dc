//! Google Books source adapter

use std::sync::Arc;

use async_trait::async_trait;

use gbooks::models::Volume;
use gbooks::GbooksClient;

use crate::source::{BookSource, SourceError};

/// Google Books implementation of [`BookSource`]
pub struct GbooksSource {
    client: Arc<GbooksClient>,
}

impl GbooksSource {
    pub fn new(client: Arc<GbooksClient>) -> Self {
        Self { client }
    }

    /// Create a GbooksSource with a reqwest Client, without an API key
    pub fn with_http_client(http_client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(GbooksClient::new(http_client)),
        }
    }
}

#[async_trait]
impl BookSource for GbooksSource {
    async fn lookup(&self, query: &str) -> Result<Option<Volume>, SourceError> {
        let response = self.client.search_volumes(query).await?;
        let top = response.items.into_iter().next();
        if top.is_none() {
            tracing::debug!("No Google Books result for '{}'", query);
        }
        Ok(top)
    }

    fn name(&self) -> &'static str {
        "gbooks"
    }
}
