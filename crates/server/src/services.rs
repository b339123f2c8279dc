mod ingest_service;

pub use ingest_service::{
    BatchReport, IngestError, IngestService, SkipReason, SkippedQuery, DEFAULT_BATCH_SIZE,
};
