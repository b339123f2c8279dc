//! Field normalization for Google Books candidates.
//!
//! Maps a raw [`Volume`] into the canonical [`NormalizedBook`] shape.
//! A candidate with no resolvable cover image is rejected here: visual
//! completeness is a hard acceptance gate for the catalog.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use gbooks::models::{ImageLinks, Volume};

use crate::keys::resolve_natural_key;
use crate::models::NormalizedBook;

pub const DEFAULT_AUTHOR: &str = "Autor Desconhecido";
pub const DEFAULT_CATEGORY: &str = "Literatura";
pub const DEFAULT_LANGUAGE: &str = "pt";
pub const MISSING_DESCRIPTION: &str = "Descrição não disponível.";
const UNTITLED: &str = "Sem título";

// Partial dates the API returns for older editions
static YEAR_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());
static YEAR_MONTH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// No thumbnail of either size; the candidate is skipped, never stored.
    #[error("candidate has no cover image")]
    NoCover,
}

/// Normalize a published date to an ISO day.
///
/// `"1999"` → `"1999-01-01"`, `"1999-05"` → `"1999-05-01"`; any other
/// non-empty value passes through unchanged; missing/empty → `None`.
pub fn normalize_published_date(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() {
        return None;
    }
    if YEAR_ONLY.is_match(value) {
        return Some(format!("{}-01-01", value));
    }
    if YEAR_MONTH.is_match(value) {
        return Some(format!("{}-01", value));
    }
    Some(value.to_string())
}

/// Normalize a candidate volume into the canonical record.
pub fn normalize_volume(volume: &Volume) -> Result<NormalizedBook, NormalizeError> {
    let info = &volume.volume_info;

    let (cover_url, cover_thumbnail) =
        derive_covers(info.image_links.as_ref(), &volume.id).ok_or(NormalizeError::NoCover)?;

    let authors = match &info.authors {
        Some(authors) if !authors.is_empty() => authors.clone(),
        _ => vec![DEFAULT_AUTHOR.to_string()],
    };
    let categories = match &info.categories {
        Some(categories) if !categories.is_empty() => categories.clone(),
        _ => vec![DEFAULT_CATEGORY.to_string()],
    };

    Ok(NormalizedBook {
        natural_key: resolve_natural_key(info, &volume.id),
        title: info.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
        subtitle: info.subtitle.clone(),
        authors,
        publisher: info.publisher.clone(),
        published_date: normalize_published_date(info.published_date.as_deref()),
        description: info
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
        page_count: info.page_count,
        language: info
            .language
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        cover_url,
        cover_thumbnail,
        categories,
        avg_rating: info.average_rating.unwrap_or(0.0).max(0.0),
        ratings_count: info.ratings_count.unwrap_or(0).max(0),
        verified: true,
    })
}

/// Derive `(cover_url, cover_thumbnail)` from the candidate's image links.
///
/// The large cover prefers the regular thumbnail upgraded to https and
/// maximum zoom with the page-curl artifact stripped. When only a small
/// thumbnail exists, the large cover is synthesized from the volume id
/// via the canonical content endpoint. No thumbnail at all → `None`.
fn derive_covers(image_links: Option<&ImageLinks>, volume_id: &str) -> Option<(String, String)> {
    let links = image_links?;
    let thumbnail = links.thumbnail.as_deref();
    let fallback = links.small_thumbnail.as_deref();

    let cover_thumbnail = secure_url(thumbnail.or(fallback)?);
    let cover_url = match thumbnail {
        Some(url) => secure_url(url).replace("zoom=1", "zoom=3"),
        None => synthesized_cover_url(volume_id),
    };

    Some((cover_url, cover_thumbnail))
}

fn secure_url(url: &str) -> String {
    url.replacen("http://", "https://", 1)
        .replace("&edge=curl", "")
}

fn synthesized_cover_url(volume_id: &str) -> String {
    format!(
        "https://books.google.com/books/content?id={}&printsec=frontcover&img=1&zoom=3",
        volume_id
    )
}
