mod client;
mod error;
pub mod models;
mod volumes;

pub use client::GbooksClient;
pub use error::GbooksError;
pub use models::{ImageLinks, IndustryIdentifier, Volume, VolumeInfo, VolumesResponse};

pub type Result<T> = std::result::Result<T, GbooksError>;
