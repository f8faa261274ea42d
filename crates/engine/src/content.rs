use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// External service a content item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentSource {
    #[serde(rename = "pexels")]
    Pexels,
    #[serde(rename = "unsplash")]
    Unsplash,
    #[serde(rename = "youtube")]
    YouTube,
}

impl ContentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSource::Pexels => "pexels",
            ContentSource::Unsplash => "unsplash",
            ContentSource::YouTube => "youtube",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Image,
    Video,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Image => "image",
            ContentKind::Video => "video",
        }
    }

    /// Extension used when a downloaded item is written to disk
    pub fn file_extension(&self) -> &'static str {
        match self {
            ContentKind::Image => "jpg",
            ContentKind::Video => "mp4",
        }
    }
}

/// A search hit normalized across providers. `(source, id)` identifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub url: String,
    pub source: ContentSource,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ContentItem {
    pub fn new(url: impl Into<String>, source: ContentSource, id: impl Into<String>) -> Self {
        ContentItem {
            url: url.into(),
            source,
            id: id.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadedItem {
    #[serde(flatten)]
    pub item: ContentItem,
    /// Local file for materialized items, the original URL for remote-only ones
    pub local_path: Option<String>,
    pub is_remote_only: bool,
}

impl DownloadedItem {
    pub fn local(item: ContentItem, local_path: impl Into<String>) -> Self {
        DownloadedItem {
            item,
            local_path: Some(local_path.into()),
            is_remote_only: false,
        }
    }

    pub fn remote_only(item: ContentItem) -> Self {
        let url = item.url.clone();
        DownloadedItem {
            item,
            local_path: Some(url),
            is_remote_only: true,
        }
    }
}

/// Deterministic file name for a downloaded item, e.g. `image_pexels_123.jpg`.
///
/// Characters outside `[A-Za-z0-9_-]` in the id are replaced so provider ids
/// can never escape the scratch directory.
pub fn download_file_name(kind: ContentKind, source: ContentSource, id: &str) -> String {
    let safe_id: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!(
        "{}_{}_{}.{}",
        kind.as_str(),
        source.as_str(),
        safe_id,
        kind.file_extension()
    )
}

/// One encoded file of a video offered by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendition {
    pub link: String,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl Rendition {
    fn is_hd(&self) -> bool {
        self.quality.as_deref() == Some("hd")
    }
}

/// Orders renditions by preference: `hd` quality first, then greater height.
/// `Ordering::Greater` means `a` is preferred.
pub fn compare_renditions(a: &Rendition, b: &Rendition) -> Ordering {
    a.is_hd()
        .cmp(&b.is_hd())
        .then_with(|| a.height.unwrap_or(0).cmp(&b.height.unwrap_or(0)))
}

/// Picks the preferred rendition; among equals the earliest one wins.
pub fn best_rendition(renditions: &[Rendition]) -> Option<&Rendition> {
    renditions.iter().fold(None, |best, curr| match best {
        None => Some(curr),
        Some(prev) => {
            if compare_renditions(curr, prev) == Ordering::Greater {
                Some(curr)
            } else {
                Some(prev)
            }
        }
    })
}
