use serde::Deserialize;

use crate::error::ProviderError;
use crate::providers::{fetch_json, ContentProvider};
use engine::content::{ContentItem, ContentKind, ContentSource};

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const MAX_RESULTS: &str = "10";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: Option<String>,
}

/// YouTube video search. Results are watch-page links with no direct file,
/// so they are never downloaded.
pub struct YouTubeProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl YouTubeProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, api_key, YOUTUBE_API_BASE)
    }

    pub fn with_base_url(client: reqwest::Client, api_key: Option<String>, base_url: &str) -> Self {
        YouTubeProvider {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ContentProvider for YouTubeProvider {
    fn source(&self) -> ContentSource {
        ContentSource::YouTube
    }

    fn supports(&self, kind: ContentKind) -> bool {
        kind == ContentKind::Video
    }

    fn is_remote_only(&self, _kind: ContentKind) -> bool {
        true
    }

    async fn search(&self, query: &str, kind: ContentKind) -> Result<Vec<ContentItem>, ProviderError> {
        if kind != ContentKind::Video {
            return Err(ProviderError::UnsupportedKind("YouTube", kind.as_str()));
        }
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials("YouTube"))?;

        let request = self
            .client
            .get(&format!("{}/youtube/v3/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", MAX_RESULTS),
                ("key", api_key),
            ]);
        let response: SearchResponse = fetch_json(request).await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let mut content = ContentItem::new(
                    format!("{}{}", WATCH_URL, video_id),
                    ContentSource::YouTube,
                    video_id,
                );
                content.title = item.snippet.and_then(|s| s.title);
                Some(content)
            })
            .collect())
    }
}
