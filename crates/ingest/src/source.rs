//! Book source trait definition

use async_trait::async_trait;

use gbooks::models::Volume;

/// Errors that can occur when looking up a query against a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Google Books error: {0}")]
    Gbooks(#[from] gbooks::GbooksError),
}

/// External lookup for one catalog query.
///
/// Implementations issue a single language-restricted search and return
/// the top candidate, or `None` when nothing matches. A transport
/// failure is an error outcome for that query only, never a pipeline
/// abort; re-running the pipeline is the retry mechanism.
#[async_trait]
pub trait BookSource: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<Option<Volume>, SourceError>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
