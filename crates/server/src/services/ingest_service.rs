//! Batch executor for catalog ingestion.
//!
//! Processes one fixed-size slice of a query catalog end-to-end:
//! lookup → normalize → resolve key → upsert, with every query yielding
//! exactly one of inserted / skipped-with-reason / errored-with-message.
//! Item-level failures never abort the batch.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use thiserror::Error;

use ingest::{find_catalog, normalize_volume, BookSource, NormalizeError, QueryCatalog};

use crate::models::UpsertedBook;
use crate::repositories::BookRepository;

/// Observed-safe default for the external API quota
pub const DEFAULT_BATCH_SIZE: usize = 12;

/// Fixed pause between items, a backpressure choice against the
/// rate-limited external API
const DEFAULT_ITEM_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unknown dataset variant: {0}")]
    UnknownVariant(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    NoCover,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "not found"),
            SkipReason::NoCover => write!(f, "no cover"),
        }
    }
}

/// A query that was processed but deliberately not persisted
#[derive(Debug, Clone)]
pub struct SkippedQuery {
    pub reason: SkipReason,
    pub query: String,
}

/// Structured result of one batch
#[derive(Debug)]
pub struct BatchReport {
    pub processed: usize,
    pub inserted: Vec<UpsertedBook>,
    pub skipped: Vec<SkippedQuery>,
    pub errors: Vec<String>,
    pub total_queries: usize,
    pub start_index: usize,
    /// Always `start_index + batch_size`, even for a clamped final slice
    pub next_offset: usize,
    pub has_more: bool,
}

pub struct IngestService {
    db: SqlitePool,
    source: Arc<dyn BookSource>,
    item_delay: Duration,
}

impl IngestService {
    pub fn new(db: SqlitePool, source: Arc<dyn BookSource>) -> Self {
        Self {
            db,
            source,
            item_delay: DEFAULT_ITEM_DELAY,
        }
    }

    /// Override the per-item delay (tests run with `Duration::ZERO`)
    pub fn with_item_delay(mut self, item_delay: Duration) -> Self {
        self.item_delay = item_delay;
        self
    }

    /// Run one batch of the named dataset variant.
    pub async fn run_batch(
        &self,
        variant_id: &str,
        start_index: usize,
        batch_size: usize,
    ) -> Result<BatchReport, IngestError> {
        let catalog = find_catalog(variant_id)
            .ok_or_else(|| IngestError::UnknownVariant(variant_id.to_string()))?;
        Ok(self
            .run_catalog_batch(catalog, start_index, batch_size)
            .await)
    }

    /// Run one batch against an explicit catalog.
    ///
    /// Sequential by design: one lookup in flight, a fixed delay between
    /// items. Re-running the same offset range converges to the same
    /// persisted state because the store deduplicates on the natural key.
    pub async fn run_catalog_batch(
        &self,
        catalog: &QueryCatalog,
        start_index: usize,
        batch_size: usize,
    ) -> BatchReport {
        let slice = catalog.slice(start_index, batch_size);
        let next_offset = start_index.saturating_add(batch_size);

        let mut report = BatchReport {
            processed: 0,
            inserted: Vec::new(),
            skipped: Vec::new(),
            errors: Vec::new(),
            total_queries: catalog.len(),
            start_index,
            next_offset,
            has_more: next_offset < catalog.len(),
        };

        tracing::info!(
            "Ingesting '{}' [{}..{}] of {} queries",
            catalog.id,
            start_index,
            start_index + slice.len(),
            catalog.len()
        );

        for (i, query) in slice.iter().enumerate() {
            if i > 0 && !self.item_delay.is_zero() {
                tokio::time::sleep(self.item_delay).await;
            }
            report.processed += 1;

            let volume = match self.source.lookup(query).await {
                Ok(Some(volume)) => volume,
                Ok(None) => {
                    tracing::info!("'{}': no result", query);
                    report.skipped.push(SkippedQuery {
                        reason: SkipReason::NotFound,
                        query: query.to_string(),
                    });
                    continue;
                }
                Err(e) => {
                    tracing::warn!("'{}': lookup failed: {}", query, e);
                    report.errors.push(format!("{}: {}", query, e));
                    continue;
                }
            };

            let book = match normalize_volume(&volume) {
                Ok(book) => book,
                Err(NormalizeError::NoCover) => {
                    tracing::info!("'{}': candidate has no cover, skipping", query);
                    report.skipped.push(SkippedQuery {
                        reason: SkipReason::NoCover,
                        query: query.to_string(),
                    });
                    continue;
                }
            };

            match BookRepository::upsert(&self.db, &book).await {
                Ok(upserted) => {
                    tracing::info!("Upserted '{}' ({})", upserted.title, book.natural_key);
                    report.inserted.push(upserted);
                }
                Err(e) => {
                    tracing::error!("'{}': persistence failed: {}", query, e);
                    report.errors.push(format!("{}: {}", query, e));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::{HashMap, HashSet};

    use async_trait::async_trait;
    use sqlx::sqlite::SqlitePoolOptions;

    use gbooks::models::{ImageLinks, IndustryIdentifier, Volume, VolumeInfo};
    use ingest::SourceError;

    struct StubSource {
        volumes: HashMap<String, Volume>,
        failing: HashSet<String>,
    }

    impl StubSource {
        fn new() -> Self {
            Self {
                volumes: HashMap::new(),
                failing: HashSet::new(),
            }
        }

        fn with_volume(mut self, query: &str, volume: Volume) -> Self {
            self.volumes.insert(query.to_string(), volume);
            self
        }

        fn with_failure(mut self, query: &str) -> Self {
            self.failing.insert(query.to_string());
            self
        }
    }

    #[async_trait]
    impl BookSource for StubSource {
        async fn lookup(&self, query: &str) -> Result<Option<Volume>, SourceError> {
            if self.failing.contains(query) {
                return Err(SourceError::Gbooks(gbooks::GbooksError::Api {
                    status_code: 503,
                    message: "temporarily unavailable".to_string(),
                }));
            }
            Ok(self.volumes.get(query).cloned())
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn volume(id: &str, title: &str, isbn13: Option<&str>, with_cover: bool) -> Volume {
        Volume {
            id: id.to_string(),
            volume_info: VolumeInfo {
                title: Some(title.to_string()),
                authors: Some(vec!["Machado de Assis".to_string()]),
                industry_identifiers: isbn13.map(|isbn| {
                    vec![IndustryIdentifier {
                        identifier_type: "ISBN_13".to_string(),
                        identifier: isbn.to_string(),
                    }]
                }),
                image_links: with_cover.then(|| ImageLinks {
                    small_thumbnail: None,
                    thumbnail: Some(format!(
                        "http://books.google.com/books/content?id={}&zoom=1",
                        id
                    )),
                }),
                ..Default::default()
            },
        }
    }

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("../../migrations").run(&pool).await.unwrap();
        pool
    }

    fn service(pool: SqlitePool, source: StubSource) -> IngestService {
        IngestService::new(pool, Arc::new(source)).with_item_delay(Duration::ZERO)
    }

    fn catalog(queries: &'static [&'static str]) -> QueryCatalog {
        QueryCatalog {
            id: "test",
            title: "Test",
            queries,
        }
    }

    #[tokio::test]
    async fn single_query_end_to_end() {
        let pool = test_pool().await;
        let source = StubSource::new().with_volume(
            "Dom Casmurro Machado de Assis",
            volume("vol1", "Dom Casmurro", Some("9788535910670"), true),
        );
        let svc = service(pool.clone(), source);
        let cat = catalog(&["Dom Casmurro Machado de Assis"]);

        let report = svc.run_catalog_batch(&cat, 0, 1).await;

        assert_eq!(report.processed, 1);
        assert_eq!(report.inserted.len(), 1);
        assert_eq!(report.inserted[0].title, "Dom Casmurro");
        assert!(report.skipped.is_empty());
        assert!(report.errors.is_empty());
        assert!(!report.has_more);
    }

    #[tokio::test]
    async fn rerunning_a_batch_creates_no_new_rows() {
        let pool = test_pool().await;
        let source = StubSource::new().with_volume(
            "Dom Casmurro Machado de Assis",
            volume("vol1", "Dom Casmurro", Some("9788535910670"), true),
        );
        let svc = service(pool.clone(), source);
        let cat = catalog(&["Dom Casmurro Machado de Assis"]);

        let first = svc.run_catalog_batch(&cat, 0, 1).await;
        let second = svc.run_catalog_batch(&cat, 0, 1).await;

        // Second pass reports processing again, but the store keeps one row
        assert_eq!(first.inserted.len(), 1);
        assert_eq!(second.inserted.len(), 1);
        assert_eq!(first.inserted[0].id, second.inserted[0].id);
        assert_eq!(BookRepository::count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn item_failure_does_not_abort_the_batch() {
        let pool = test_pool().await;
        let queries: &[&str] = &[
            "q0", "q1", "q2", "q3", "q4", "q5", "q6", "q7", "q8", "q9",
        ];
        let mut source = StubSource::new().with_failure("q2");
        for (i, q) in queries.iter().enumerate() {
            if *q == "q2" {
                continue;
            }
            source = source.with_volume(
                q,
                volume(
                    &format!("vol{}", i),
                    &format!("Title {}", i),
                    Some(&format!("97885000000{:02}", i)),
                    true,
                ),
            );
        }
        let svc = service(pool.clone(), source);
        let cat = catalog(&[
            "q0", "q1", "q2", "q3", "q4", "q5", "q6", "q7", "q8", "q9",
        ]);

        let report = svc.run_catalog_batch(&cat, 0, 10).await;

        // Items after the failing one are still attempted and recorded
        assert_eq!(report.processed, 10);
        assert_eq!(report.inserted.len(), 9);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("q2: "));
        assert_eq!(BookRepository::count(&pool).await.unwrap(), 9);
    }

    #[tokio::test]
    async fn classifies_skips_by_reason() {
        let pool = test_pool().await;
        let source = StubSource::new()
            // "missing" has no stub volume at all -> not found
            .with_volume("coverless", volume("vol1", "Sem Capa", Some("9788500000001"), false));
        let svc = service(pool.clone(), source);
        let cat = catalog(&["missing", "coverless"]);

        let report = svc.run_catalog_batch(&cat, 0, 2).await;

        assert_eq!(report.processed, 2);
        assert!(report.inserted.is_empty());
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].reason, SkipReason::NotFound);
        assert_eq!(report.skipped[1].reason, SkipReason::NoCover);
        // The cover gate is hard: nothing was persisted
        assert_eq!(BookRepository::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn final_partial_batch_clamps_and_terminates() {
        let pool = test_pool().await;
        let svc = service(pool, StubSource::new());
        let cat = catalog(&[
            "a01", "a02", "a03", "a04", "a05", "a06", "a07", "a08", "a09", "a10", "a11", "a12",
            "a13", "a14", "a15", "a16", "a17", "a18", "a19", "a20", "a21", "a22", "a23",
        ]);

        let first = svc.run_catalog_batch(&cat, 0, 10).await;
        assert_eq!(first.processed, 10);
        assert!(first.has_more);
        assert_eq!(first.next_offset, 10);

        let last = svc.run_catalog_batch(&cat, 20, 10).await;
        assert_eq!(last.processed, 3);
        assert_eq!(last.next_offset, 30);
        assert!(!last.has_more);
    }

    #[tokio::test]
    async fn unknown_variant_is_an_invocation_error() {
        let pool = test_pool().await;
        let svc = service(pool, StubSource::new());

        let err = svc.run_batch("no-such-variant", 0, 10).await.unwrap_err();
        assert!(matches!(err, IngestError::UnknownVariant(_)));
    }
}
