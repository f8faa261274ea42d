use futures::future::join_all;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::providers::{search_or_empty, ContentProvider};
use engine::content::{download_file_name, ContentItem, ContentKind, DownloadedItem};

pub mod download;

pub use download::{Fetcher, HttpFetcher};

#[derive(Debug, Clone, Default, Serialize)]
pub struct FoundContent {
    pub images: Vec<DownloadedItem>,
    pub videos: Vec<DownloadedItem>,
}

/// Searches every registered provider and materializes the hits locally
pub struct ContentAggregator {
    providers: Vec<Arc<dyn ContentProvider>>,
    fetcher: Arc<dyn Fetcher>,
    temp_dir: PathBuf,
    max_images: usize,
    max_videos: usize,
}

impl ContentAggregator {
    pub fn new(
        providers: Vec<Arc<dyn ContentProvider>>,
        fetcher: Arc<dyn Fetcher>,
        temp_dir: impl Into<PathBuf>,
        max_images: usize,
        max_videos: usize,
    ) -> Self {
        ContentAggregator {
            providers,
            fetcher,
            temp_dir: temp_dir.into(),
            max_images,
            max_videos,
        }
    }

    /// Provider and download failures only shrink the result; the call fails
    /// only when the scratch directory is unusable.
    pub async fn find_content(&self, keywords: &[String]) -> Result<FoundContent, PipelineError> {
        tokio::fs::create_dir_all(&self.temp_dir).await?;

        let query = keywords.join(" ");
        let (images, videos) = tokio::join!(
            self.find_kind(&query, ContentKind::Image, self.max_images),
            self.find_kind(&query, ContentKind::Video, self.max_videos),
        );

        info!(
            "[Content] Query {:?}: {} images, {} videos",
            query,
            images.len(),
            videos.len()
        );
        Ok(FoundContent { images, videos })
    }

    async fn find_kind(&self, query: &str, kind: ContentKind, cap: usize) -> Vec<DownloadedItem> {
        let candidates = self.search_all(query, kind, cap).await;
        let downloads = candidates
            .into_iter()
            .map(|(item, remote_only)| self.materialize(item, kind, remote_only));

        // join_all yields in input order regardless of completion order
        join_all(downloads).await.into_iter().flatten().collect()
    }

    /// Concurrent search across providers, merged in registration order and
    /// truncated to `cap`. Each item carries its provider's remote-only flag.
    async fn search_all(&self, query: &str, kind: ContentKind, cap: usize) -> Vec<(ContentItem, bool)> {
        let providers: Vec<&Arc<dyn ContentProvider>> =
            self.providers.iter().filter(|p| p.supports(kind)).collect();

        let results = join_all(providers.iter().map(|p| search_or_empty(&***p, query, kind))).await;

        providers
            .iter()
            .zip(results)
            .flat_map(|(provider, items)| {
                let remote_only = provider.is_remote_only(kind);
                items.into_iter().map(move |item| (item, remote_only))
            })
            .take(cap)
            .collect()
    }

    async fn materialize(&self, item: ContentItem, kind: ContentKind, remote_only: bool) -> Option<DownloadedItem> {
        if remote_only {
            return Some(DownloadedItem::remote_only(item));
        }

        let dest = self
            .temp_dir
            .join(download_file_name(kind, item.source, &item.id));
        match self.fetcher.fetch_to(&item.url, &dest).await {
            Ok(()) => Some(DownloadedItem::local(item, dest.to_string_lossy())),
            Err(e) => {
                warn!("[Content] Error downloading {} {}: {}", kind.as_str(), item.url, e);
                None
            }
        }
    }
}
