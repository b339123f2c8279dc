use reqwest::Client;

use crate::error::GbooksError;

const BASE_URL: &str = "https://www.googleapis.com/books/v1";
pub(crate) const USER_AGENT: &str = "acervo/catalog-ingest";

pub struct GbooksClient {
    client: Client,
    api_key: Option<String>,
    pub(crate) lang: String,
}

impl GbooksClient {
    /// Create a GbooksClient with a reqwest Client.
    /// Searches are restricted to Portuguese results by default.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            api_key: None,
            lang: "pt".to_string(),
        }
    }

    /// Create a GbooksClient that authenticates with an API key.
    /// The key raises the daily quota; anonymous access also works.
    pub fn with_api_key(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: Some(api_key.into()),
            lang: "pt".to_string(),
        }
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", BASE_URL, path)
    }

    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GbooksError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| GbooksError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}
