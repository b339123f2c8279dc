use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::BatchReport;

/// A persisted catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub natural_key: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: String,
    pub page_count: Option<i64>,
    pub language: String,
    pub cover_url: String,
    pub cover_thumbnail: String,
    pub categories: Vec<String>,
    pub avg_rating: f64,
    pub ratings_count: i64,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Id and title of an inserted-or-updated row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertedBook {
    pub id: i64,
    pub title: String,
}

/// Wire shape of GET /ingest
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    /// Number of rows inserted or updated in this batch
    pub success: usize,
    pub skipped_count: usize,
    /// Total queries in the dataset variant
    pub total_books: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub results: Vec<UpsertedBook>,
    /// One "<reason>: <query>" line per skipped query
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
}

impl From<BatchReport> for IngestResponse {
    fn from(report: BatchReport) -> Self {
        Self {
            success: report.inserted.len(),
            skipped_count: report.skipped.len(),
            total_books: report.total_queries,
            start_index: report.start_index,
            end_index: report.next_offset,
            results: report.inserted,
            skipped: report
                .skipped
                .iter()
                .map(|s| format!("{}: {}", s.reason, s.query))
                .collect(),
            errors: report.errors,
        }
    }
}

/// One dataset variant, as listed by GET /catalogs
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub id: String,
    pub title: String,
    pub query_count: usize,
}
