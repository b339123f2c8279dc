use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Failure invoking the batch executor itself, distinct from the
/// item-level errors absorbed into a [`BatchOutcome`]. Halts the run.
#[derive(Debug, Error)]
pub enum BatchInvokeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ingest endpoint returned status {status_code}: {message}")]
    Api { status_code: u16, message: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertedRecord {
    pub id: i64,
    pub title: String,
}

/// One batch response, in the `/ingest` wire shape
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub success: usize,
    pub skipped_count: usize,
    pub total_books: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub results: Vec<InsertedRecord>,
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
}

impl BatchOutcome {
    pub fn has_more(&self) -> bool {
        self.end_index < self.total_books
    }
}

/// Seam between the orchestrator and the batch executor, so runs can
/// drive the HTTP endpoint or an in-process stub interchangeably.
#[async_trait]
pub trait ExecuteBatch: Send + Sync {
    async fn execute(
        &self,
        dataset_variant: &str,
        start_index: usize,
        batch_size: usize,
    ) -> Result<BatchOutcome, BatchInvokeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_ingest_wire_shape() {
        let body = r#"{
            "success": 1,
            "skippedCount": 2,
            "totalBooks": 23,
            "startIndex": 0,
            "endIndex": 10,
            "results": [{"id": 7, "title": "Dom Casmurro"}],
            "skipped": ["not found: Iracema José de Alencar"],
            "errors": []
        }"#;

        let outcome: BatchOutcome = serde_json::from_str(body).unwrap();
        assert_eq!(outcome.success, 1);
        assert_eq!(outcome.results[0].title, "Dom Casmurro");
        assert!(outcome.has_more());
    }
}
