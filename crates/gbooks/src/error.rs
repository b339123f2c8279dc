use thiserror::Error;

#[derive(Debug, Error)]
pub enum GbooksError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google Books API error (status {status_code}): {message}")]
    Api { status_code: u16, message: String },

    #[error("Failed to decode Google Books response at {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}
