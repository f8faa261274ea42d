use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ProviderError;
use engine::content::{ContentItem, ContentKind, ContentSource};

pub mod pexels;
pub mod unsplash;
pub mod youtube;

pub use pexels::PexelsProvider;
pub use unsplash::UnsplashProvider;
pub use youtube::YouTubeProvider;

/// A search backend for images and/or videos
#[async_trait::async_trait]
pub trait ContentProvider: Send + Sync {
    fn source(&self) -> ContentSource;

    fn supports(&self, kind: ContentKind) -> bool;

    /// Items of this kind are kept by URL instead of being downloaded
    fn is_remote_only(&self, _kind: ContentKind) -> bool {
        false
    }

    async fn search(&self, query: &str, kind: ContentKind) -> Result<Vec<ContentItem>, ProviderError>;
}

/// Runs a search and downgrades any failure to "no results"
pub async fn search_or_empty(
    provider: &dyn ContentProvider,
    query: &str,
    kind: ContentKind,
) -> Vec<ContentItem> {
    match provider.search(query, kind).await {
        Ok(items) => {
            debug!(
                "[Providers] {} returned {} {} results",
                provider.source().as_str(),
                items.len(),
                kind.as_str()
            );
            items
        }
        Err(e) => {
            warn!(
                "[Providers] {} {} search failed: {}",
                provider.source().as_str(),
                kind.as_str(),
                e
            );
            Vec::new()
        }
    }
}

/// Sends a request and decodes a JSON body, mapping each failure mode
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::Payload(e.to_string()))
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::time::Duration;

    /// In-memory provider with canned results per kind
    pub struct FakeProvider {
        pub source: ContentSource,
        pub images: Option<Vec<ContentItem>>,
        pub videos: Option<Vec<ContentItem>>,
        pub remote_only: bool,
        pub fail: bool,
        pub delay: Duration,
    }

    impl FakeProvider {
        pub fn images(source: ContentSource, ids: &[&str]) -> Self {
            FakeProvider {
                source,
                images: Some(items(source, "img", ids)),
                videos: None,
                remote_only: false,
                fail: false,
                delay: Duration::ZERO,
            }
        }

        pub fn videos(source: ContentSource, ids: &[&str]) -> Self {
            FakeProvider {
                source,
                images: None,
                videos: Some(items(source, "vid", ids)),
                remote_only: false,
                fail: false,
                delay: Duration::ZERO,
            }
        }

        /// Supports images but every search errors
        pub fn failing_images(source: ContentSource) -> Self {
            FakeProvider {
                source,
                images: Some(Vec::new()),
                videos: None,
                remote_only: false,
                fail: true,
                delay: Duration::ZERO,
            }
        }

        pub fn remote_only(mut self) -> Self {
            self.remote_only = true;
            self
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    fn items(source: ContentSource, prefix: &str, ids: &[&str]) -> Vec<ContentItem> {
        ids.iter()
            .map(|id| {
                ContentItem::new(
                    format!("https://{}.example/{}/{}", source.as_str(), prefix, id),
                    source,
                    *id,
                )
            })
            .collect()
    }

    #[async_trait::async_trait]
    impl ContentProvider for FakeProvider {
        fn source(&self) -> ContentSource {
            self.source
        }

        fn supports(&self, kind: ContentKind) -> bool {
            match kind {
                ContentKind::Image => self.images.is_some(),
                ContentKind::Video => self.videos.is_some(),
            }
        }

        fn is_remote_only(&self, _kind: ContentKind) -> bool {
            self.remote_only
        }

        async fn search(&self, _query: &str, kind: ContentKind) -> Result<Vec<ContentItem>, ProviderError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail {
                return Err(ProviderError::Payload("injected failure".to_string()));
            }
            match kind {
                ContentKind::Image => self.images.clone(),
                ContentKind::Video => self.videos.clone(),
            }
            .ok_or(ProviderError::UnsupportedKind("fake", kind.as_str()))
        }
    }
}
