use sqlx::{Row, SqlitePool};

use ingest::NormalizedBook;

use crate::models::{Book, UpsertedBook};

/// Common SELECT fields for book queries
const SELECT_BOOK: &str = r#"
    SELECT
        id, created_at, updated_at,
        natural_key, title, subtitle, authors,
        publisher, published_date, description,
        page_count, language, cover_url, cover_thumbnail,
        categories, avg_rating, ratings_count, verified
    FROM books
"#;

pub struct BookRepository;

impl BookRepository {
    /// Atomic insert-or-update keyed on the natural key.
    ///
    /// Repeated ingestion of the same work converges to the latest
    /// successful normalization instead of duplicating the row, which is
    /// what makes the whole pipeline safely re-runnable.
    pub async fn upsert(
        pool: &SqlitePool,
        book: &NormalizedBook,
    ) -> Result<UpsertedBook, sqlx::Error> {
        let authors = encode_json(&book.authors)?;
        let categories = encode_json(&book.categories)?;

        let row = sqlx::query(
            r#"
            INSERT INTO books (
                natural_key, title, subtitle, authors, publisher,
                published_date, description, page_count, language,
                cover_url, cover_thumbnail, categories,
                avg_rating, ratings_count, verified
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT(natural_key) DO UPDATE SET
                title = excluded.title,
                subtitle = excluded.subtitle,
                authors = excluded.authors,
                publisher = excluded.publisher,
                published_date = excluded.published_date,
                description = excluded.description,
                page_count = excluded.page_count,
                language = excluded.language,
                cover_url = excluded.cover_url,
                cover_thumbnail = excluded.cover_thumbnail,
                categories = excluded.categories,
                avg_rating = excluded.avg_rating,
                ratings_count = excluded.ratings_count,
                verified = excluded.verified,
                updated_at = CURRENT_TIMESTAMP
            RETURNING id, title
            "#,
        )
        .bind(&book.natural_key)
        .bind(&book.title)
        .bind(&book.subtitle)
        .bind(&authors)
        .bind(&book.publisher)
        .bind(&book.published_date)
        .bind(&book.description)
        .bind(book.page_count)
        .bind(&book.language)
        .bind(&book.cover_url)
        .bind(&book.cover_thumbnail)
        .bind(&categories)
        .bind(book.avg_rating)
        .bind(book.ratings_count)
        .bind(book.verified)
        .fetch_one(pool)
        .await?;

        Ok(UpsertedBook {
            id: row.get("id"),
            title: row.get("title"),
        })
    }

    pub async fn get_by_natural_key(
        pool: &SqlitePool,
        natural_key: &str,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("{} WHERE natural_key = $1", SELECT_BOOK);
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(natural_key)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!("{} ORDER BY updated_at DESC LIMIT $1", SELECT_BOOK);
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(pool)
            .await
    }
}

fn encode_json(values: &[String]) -> Result<String, sqlx::Error> {
    serde_json::to_string(values).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    natural_key: String,
    title: String,
    subtitle: Option<String>,
    authors: String,
    publisher: Option<String>,
    published_date: Option<String>,
    description: String,
    page_count: Option<i64>,
    language: String,
    cover_url: String,
    cover_thumbnail: String,
    categories: String,
    avg_rating: f64,
    ratings_count: i64,
    verified: bool,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            natural_key: row.natural_key,
            title: row.title,
            subtitle: row.subtitle,
            authors: serde_json::from_str(&row.authors).unwrap_or_default(),
            publisher: row.publisher,
            published_date: row.published_date,
            description: row.description,
            page_count: row.page_count,
            language: row.language,
            cover_url: row.cover_url,
            cover_thumbnail: row.cover_thumbnail,
            categories: serde_json::from_str(&row.categories).unwrap_or_default(),
            avg_rating: row.avg_rating,
            ratings_count: row.ratings_count,
            verified: row.verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
