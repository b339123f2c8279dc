//! Domain layer for catalog ingestion.
//!
//! This crate turns a raw Google Books candidate into a canonical
//! [`NormalizedBook`] and defines the pieces the batch executor is built
//! from:
//!
//! - [`QueryCatalog`]: static, ordered lists of search queries per
//!   dataset variant
//! - [`BookSource`]: provider trait for the external lookup, with a
//!   Google Books implementation
//! - [`normalize_volume`]: field normalization (dates, cover URLs,
//!   fallback defaults)
//! - [`resolve_natural_key`]: stable natural key derivation
//!   (ISBN-13 → ISBN-10 → synthetic)

mod adapters;
mod catalog;
mod keys;
mod models;
mod normalize;
mod source;

pub use adapters::GbooksSource;
pub use catalog::{find_catalog, QueryCatalog, CATALOGS};
pub use keys::{resolve_natural_key, SYNTHETIC_KEY_PREFIX};
pub use models::NormalizedBook;
pub use normalize::{normalize_published_date, normalize_volume, NormalizeError};
pub use source::{BookSource, SourceError};
