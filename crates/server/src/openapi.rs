use utoipa::OpenApi;

use crate::models::{Book, CatalogSummary, IngestResponse, UpsertedBook};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Acervo API",
        version = "1.0.0"
    ),
    tags(
        (name = "ingest", description = "Catalog ingestion endpoints"),
        (name = "books", description = "Ingested book endpoints")
    ),
    components(schemas(
        IngestResponse,
        UpsertedBook,
        CatalogSummary,
        Book
    ))
)]
pub struct ApiDoc;
