use crate::client::{GbooksClient, USER_AGENT};
use crate::models::VolumesResponse;

/// How many candidates to request per search; only the top one is used,
/// the rest absorb ranking jitter between runs.
const MAX_RESULTS: &str = "5";

impl GbooksClient {
    /// Search volumes by free text, restricted to the client language.
    /// GET /volumes?q={query}&langRestrict={lang}&maxResults=5
    pub async fn search_volumes(&self, query: &str) -> crate::Result<VolumesResponse> {
        let url = self.url("/volumes");

        let mut request = self
            .client()
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("q", query),
                ("langRestrict", self.lang.as_str()),
                ("maxResults", MAX_RESULTS),
            ]);

        if let Some(key) = self.api_key() {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }
}
