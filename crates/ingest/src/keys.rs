//! Natural key derivation.
//!
//! The natural key is what deduplicates the catalog across runs: two
//! queries that resolve to the same work must resolve to the same key.
//! Priority is fixed (ISBN-13, then ISBN-10, then a synthetic key) so
//! identifier ordering drift in the API never changes the result.

use gbooks::models::VolumeInfo;

/// Prefix for synthetic keys built from the Google Books volume id,
/// used when a candidate carries no ISBN at all.
pub const SYNTHETIC_KEY_PREFIX: &str = "gbooks:";

const ISBN_13: &str = "ISBN_13";
const ISBN_10: &str = "ISBN_10";

/// Derive the natural key for a candidate volume.
pub fn resolve_natural_key(info: &VolumeInfo, volume_id: &str) -> String {
    if let Some(isbn) = find_identifier(info, ISBN_13) {
        return isbn.to_string();
    }
    if let Some(isbn) = find_identifier(info, ISBN_10) {
        return isbn.to_string();
    }
    format!("{}{}", SYNTHETIC_KEY_PREFIX, volume_id)
}

fn find_identifier<'a>(info: &'a VolumeInfo, identifier_type: &str) -> Option<&'a str> {
    info.industry_identifiers
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find(|id| id.identifier_type == identifier_type)
        .map(|id| id.identifier.as_str())
}
