use serde::Deserialize;

use crate::error::ProviderError;
use crate::providers::{fetch_json, ContentProvider};
use engine::content::{best_rendition, ContentItem, ContentKind, ContentSource, Rendition};

const PEXELS_API_BASE: &str = "https://api.pexels.com";
const IMAGES_PER_PAGE: &str = "15";
const VIDEOS_PER_PAGE: &str = "10";

#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: u64,
    src: PhotoSrc,
}

#[derive(Debug, Deserialize)]
struct PhotoSrc {
    original: String,
}

#[derive(Debug, Deserialize)]
struct VideoSearchResponse {
    #[serde(default)]
    videos: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    id: u64,
    #[serde(default)]
    video_files: Vec<Rendition>,
}

/// Pexels photos and videos, both downloadable
pub struct PexelsProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl PexelsProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, api_key, PEXELS_API_BASE)
    }

    pub fn with_base_url(client: reqwest::Client, api_key: Option<String>, base_url: &str) -> Self {
        PexelsProvider {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn search_photos(&self, api_key: &str, query: &str) -> Result<Vec<ContentItem>, ProviderError> {
        let request = self
            .client
            .get(&format!("{}/v1/search", self.base_url))
            .header("Authorization", api_key)
            .query(&[("query", query), ("per_page", IMAGES_PER_PAGE)]);
        let response: PhotoSearchResponse = fetch_json(request).await?;

        Ok(response
            .photos
            .into_iter()
            .map(|photo| ContentItem::new(photo.src.original, ContentSource::Pexels, photo.id.to_string()))
            .collect())
    }

    async fn search_videos(&self, api_key: &str, query: &str) -> Result<Vec<ContentItem>, ProviderError> {
        let request = self
            .client
            .get(&format!("{}/videos/search", self.base_url))
            .header("Authorization", api_key)
            .query(&[("query", query), ("per_page", VIDEOS_PER_PAGE)]);
        let response: VideoSearchResponse = fetch_json(request).await?;

        // Videos without any file cannot be downloaded
        Ok(response
            .videos
            .into_iter()
            .filter_map(|video| {
                let file = best_rendition(&video.video_files)?;
                Some(ContentItem::new(file.link.clone(), ContentSource::Pexels, video.id.to_string()))
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl ContentProvider for PexelsProvider {
    fn source(&self) -> ContentSource {
        ContentSource::Pexels
    }

    fn supports(&self, _kind: ContentKind) -> bool {
        true
    }

    async fn search(&self, query: &str, kind: ContentKind) -> Result<Vec<ContentItem>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials("Pexels"))?;

        match kind {
            ContentKind::Image => self.search_photos(api_key, query).await,
            ContentKind::Video => self.search_videos(api_key, query).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    fn pexels_app() -> Router {
        Router::new()
            .route(
                "/v1/search",
                get(|headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("secret") {
                        return Err(StatusCode::UNAUTHORIZED);
                    }
                    assert_eq!(params.get("query").map(String::as_str), Some("calm forest"));
                    assert_eq!(params.get("per_page").map(String::as_str), Some("15"));
                    Ok(Json(json!({
                        "page": 1,
                        "photos": [
                            { "id": 11, "src": { "original": "https://images.pexels.com/11.jpeg", "tiny": "t" } },
                            { "id": 12, "src": { "original": "https://images.pexels.com/12.jpeg" } }
                        ]
                    })))
                }),
            )
            .route(
                "/videos/search",
                get(|| async {
                    Json(json!({
                        "videos": [
                            {
                                "id": 7,
                                "video_files": [
                                    { "link": "https://v/7-sd.mp4", "quality": "sd", "height": 2160 },
                                    { "link": "https://v/7-hd.mp4", "quality": "hd", "height": 1080 },
                                    { "link": "https://v/7-hd720.mp4", "quality": "hd", "height": 720 }
                                ]
                            },
                            { "id": 8, "video_files": [] }
                        ]
                    }))
                }),
            )
    }

    #[tokio::test]
    async fn maps_photos_to_items() {
        let base = serve(pexels_app()).await;
        let provider = PexelsProvider::with_base_url(reqwest::Client::new(), Some("secret".into()), &base);

        let items = provider.search("calm forest", ContentKind::Image).await.unwrap();
        assert_eq!(
            items,
            vec![
                ContentItem::new("https://images.pexels.com/11.jpeg", ContentSource::Pexels, "11"),
                ContentItem::new("https://images.pexels.com/12.jpeg", ContentSource::Pexels, "12"),
            ]
        );
    }

    #[tokio::test]
    async fn videos_use_best_rendition_and_skip_empty_ones() {
        let base = serve(pexels_app()).await;
        let provider = PexelsProvider::with_base_url(reqwest::Client::new(), Some("secret".into()), &base);

        let items = provider.search("calm forest", ContentKind::Video).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://v/7-hd.mp4");
        assert_eq!(items[0].id, "7");
    }

    #[tokio::test]
    async fn rejected_key_is_a_status_error() {
        let base = serve(pexels_app()).await;
        let provider = PexelsProvider::with_base_url(reqwest::Client::new(), Some("wrong".into()), &base);

        let err = provider.search("calm forest", ContentKind::Image).await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn missing_key_is_reported() {
        let provider = PexelsProvider::new(reqwest::Client::new(), None);
        let err = provider.search("q", ContentKind::Image).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredentials("Pexels")));
    }
}
