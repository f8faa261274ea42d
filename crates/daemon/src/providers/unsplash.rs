use serde::Deserialize;

use crate::error::ProviderError;
use crate::providers::{fetch_json, ContentProvider};
use engine::content::{ContentItem, ContentKind, ContentSource};

const UNSPLASH_API_BASE: &str = "https://api.unsplash.com";
const IMAGES_PER_PAGE: &str = "15";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    full: String,
}

pub struct UnsplashProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl UnsplashProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, api_key, UNSPLASH_API_BASE)
    }

    pub fn with_base_url(client: reqwest::Client, api_key: Option<String>, base_url: &str) -> Self {
        UnsplashProvider {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ContentProvider for UnsplashProvider {
    fn source(&self) -> ContentSource {
        ContentSource::Unsplash
    }

    fn supports(&self, kind: ContentKind) -> bool {
        kind == ContentKind::Image
    }

    async fn search(&self, query: &str, kind: ContentKind) -> Result<Vec<ContentItem>, ProviderError> {
        if kind != ContentKind::Image {
            return Err(ProviderError::UnsupportedKind("Unsplash", kind.as_str()));
        }
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials("Unsplash"))?;

        let request = self
            .client
            .get(&format!("{}/search/photos", self.base_url))
            .header("Authorization", format!("Client-ID {}", api_key))
            .query(&[("query", query), ("per_page", IMAGES_PER_PAGE)]);
        let response: SearchResponse = fetch_json(request).await?;

        Ok(response
            .results
            .into_iter()
            .map(|photo| ContentItem::new(photo.urls.full, ContentSource::Unsplash, photo.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{http::HeaderMap, routing::get, Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn sends_client_id_and_maps_full_urls() {
        let app = Router::new().route(
            "/search/photos",
            get(|headers: HeaderMap| async move {
                assert_eq!(
                    headers.get("authorization").and_then(|v| v.to_str().ok()),
                    Some("Client-ID abc")
                );
                Json(json!({
                    "total": 1,
                    "results": [{ "id": "Xy-1", "urls": { "full": "https://images.unsplash.com/Xy-1", "raw": "r" } }]
                }))
            }),
        );
        let base = serve(app).await;
        let provider = UnsplashProvider::with_base_url(reqwest::Client::new(), Some("abc".into()), &base);

        let items = provider.search("forest", ContentKind::Image).await.unwrap();
        assert_eq!(
            items,
            vec![ContentItem::new("https://images.unsplash.com/Xy-1", ContentSource::Unsplash, "Xy-1")]
        );
    }

    #[tokio::test]
    async fn malformed_payload_is_reported() {
        let app = Router::new().route("/search/photos", get(|| async { "<html>oops</html>" }));
        let base = serve(app).await;
        let provider = UnsplashProvider::with_base_url(reqwest::Client::new(), Some("abc".into()), &base);

        let err = provider.search("forest", ContentKind::Image).await.unwrap_err();
        assert!(matches!(err, ProviderError::Payload(_)));
    }

    #[tokio::test]
    async fn videos_are_not_supported() {
        let provider = UnsplashProvider::new(reqwest::Client::new(), Some("abc".into()));
        assert!(!provider.supports(ContentKind::Video));
        assert!(matches!(
            provider.search("forest", ContentKind::Video).await,
            Err(ProviderError::UnsupportedKind(..))
        ));
    }
}
