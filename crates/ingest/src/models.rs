use serde::{Deserialize, Serialize};

/// Canonical catalog record, ready to be upserted.
///
/// Every field already carries its fallback: `authors` and `categories`
/// are never empty, `description` holds a placeholder when the source
/// had none, and `cover_url`/`cover_thumbnail` are always resolvable
/// (a candidate without a cover never becomes a `NormalizedBook`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedBook {
    pub natural_key: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    /// ISO date (`YYYY-MM-DD`) or the source value verbatim
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
}
