use async_trait::async_trait;

use crate::executor::{BatchInvokeError, BatchOutcome, ExecuteBatch};

/// `ExecuteBatch` implementation that drives a remote `/ingest` endpoint
pub struct HttpBatchClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBatchClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }
}

#[async_trait]
impl ExecuteBatch for HttpBatchClient {
    async fn execute(
        &self,
        dataset_variant: &str,
        start_index: usize,
        batch_size: usize,
    ) -> Result<BatchOutcome, BatchInvokeError> {
        let url = format!("{}/ingest", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("datasetVariant", dataset_variant),
                ("startIndex", &start_index.to_string()),
                ("batchSize", &batch_size.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BatchInvokeError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
