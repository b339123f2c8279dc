use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Dev,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The pipeline refuses to start without its storage credential.
    #[error("DATABASE_URL is not set; the ingest service cannot start without its storage credential")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub env: Environment,
    pub database_url: String,
    pub max_connections: u32,
    /// Optional; anonymous Google Books access works with a lower quota
    pub gbooks_api_key: Option<String>,
}

impl Config {
    pub fn new(env: Environment, database_url: impl Into<String>) -> Self {
        Self {
            env,
            database_url: database_url.into(),
            max_connections: 5,
            gbooks_api_key: None,
        }
    }

    /// Build the configuration from the environment. Checked before any
    /// processing begins: a missing `DATABASE_URL` is fatal at startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;
        if database_url.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let env = Environment::from_str(&std::env::var("APP_ENV").unwrap_or_default());
        let gbooks_api_key = std::env::var("GOOGLE_BOOKS_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        Ok(Self {
            env,
            database_url,
            max_connections: 5,
            gbooks_api_key,
        })
    }
}
