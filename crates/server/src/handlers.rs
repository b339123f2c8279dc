use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use ingest::CATALOGS;

use crate::error::AppResult;
use crate::models::{Book, CatalogSummary, IngestResponse};
use crate::repositories::BookRepository;
use crate::services::DEFAULT_BATCH_SIZE;
use crate::state::AppState;

/// Query parameters for one ingestion batch
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct IngestParams {
    /// Dataset variant to ingest (see GET /catalogs)
    pub dataset_variant: String,
    /// Offset into the query catalog, defaults to 0
    pub start_index: Option<usize>,
    /// Batch size, defaults to 12
    pub batch_size: Option<usize>,
}

/// Process one batch of a dataset variant
#[utoipa::path(
    get,
    path = "/ingest",
    tag = "ingest",
    params(IngestParams),
    responses(
        (status = 200, description = "Batch processed", body = IngestResponse),
        (status = 404, description = "Unknown dataset variant"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn run_ingest_batch(
    State(state): State<AppState>,
    Query(params): Query<IngestParams>,
) -> AppResult<Json<IngestResponse>> {
    let start_index = params.start_index.unwrap_or(0);
    let batch_size = params.batch_size.unwrap_or(DEFAULT_BATCH_SIZE);

    let report = state
        .ingest
        .run_batch(&params.dataset_variant, start_index, batch_size)
        .await?;

    Ok(Json(IngestResponse::from(report)))
}

/// List available dataset variants
#[utoipa::path(
    get,
    path = "/catalogs",
    tag = "ingest",
    responses(
        (status = 200, description = "Dataset variants", body = Vec<CatalogSummary>)
    )
)]
pub async fn list_catalogs() -> Json<Vec<CatalogSummary>> {
    Json(
        CATALOGS
            .iter()
            .map(|c| CatalogSummary {
                id: c.id.to_string(),
                title: c.title.to_string(),
                query_count: c.len(),
            })
            .collect(),
    )
}

/// Query parameters for listing books
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBooksParams {
    /// Maximum rows to return, defaults to 50
    pub limit: Option<i64>,
}

/// List recently ingested books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(ListBooksParams),
    responses(
        (status = 200, description = "Recently ingested books", body = Vec<Book>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListBooksParams>,
) -> AppResult<Json<Vec<Book>>> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let books = BookRepository::list_recent(&state.db, limit).await?;
    Ok(Json(books))
}
