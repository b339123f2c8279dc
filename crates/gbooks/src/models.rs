use serde::{Deserialize, Serialize};

/// Response from GET /volumes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    #[serde(default)]
    pub total_items: i64,
    /// Absent entirely when the search matches nothing
    #[serde(default)]
    pub items: Vec<Volume>,
}

/// One volume in a search result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub authors: Option<Vec<String>>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
    pub page_count: Option<i64>,
    pub categories: Option<Vec<String>>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<i64>,
    pub language: Option<String>,
    pub image_links: Option<ImageLinks>,
}

/// Identifier attached to a volume, e.g. ISBN_13 / ISBN_10 / OTHER
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub identifier_type: String,
    pub identifier: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_search_response() {
        let body = r#"{
            "kind": "books#volumes",
            "totalItems": 1,
            "items": [{
                "id": "abc123",
                "volumeInfo": {
                    "title": "Dom Casmurro",
                    "authors": ["Machado de Assis"],
                    "publishedDate": "1899",
                    "industryIdentifiers": [
                        {"type": "ISBN_13", "identifier": "9788535910670"}
                    ],
                    "imageLinks": {
                        "thumbnail": "http://books.google.com/books/content?id=abc123&zoom=1&edge=curl"
                    }
                }
            }]
        }"#;

        let response: VolumesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total_items, 1);
        let info = &response.items[0].volume_info;
        assert_eq!(info.title.as_deref(), Some("Dom Casmurro"));
        assert_eq!(
            info.industry_identifiers.as_ref().unwrap()[0].identifier,
            "9788535910670"
        );
    }

    #[test]
    fn deserializes_empty_search_response() {
        // Google omits "items" entirely when nothing matches
        let body = r#"{"kind": "books#volumes", "totalItems": 0}"#;
        let response: VolumesResponse = serde_json::from_str(body).unwrap();
        assert!(response.items.is_empty());
    }
}
