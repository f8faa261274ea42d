use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::content::DownloadedItem;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "mkv"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Unknown,
}

impl MediaType {
    /// Classifies a file by extension (case-insensitive)
    pub fn from_path(path: &Path) -> MediaType {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some(e) if VIDEO_EXTENSIONS.contains(&e) => MediaType::Video,
            Some(e) if IMAGE_EXTENSIONS.contains(&e) => MediaType::Image,
            _ => MediaType::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaPlanEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

/// Everything the external renderer needs for one video.
///
/// Only [`MediaPlanBuilder`] constructs it, which guarantees `media` is never
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderJob {
    media: Vec<MediaPlanEntry>,
    narration: String,
    title: String,
    output_path: String,
}

impl RenderJob {
    pub fn media(&self) -> &[MediaPlanEntry] {
        &self.media
    }

    pub fn narration(&self) -> &str {
        &self.narration
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("No valid media files were found")]
    EmptyPlan,
}

pub struct MediaPlanBuilder {
    output_dir: PathBuf,
}

impl MediaPlanBuilder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        MediaPlanBuilder {
            output_dir: output_dir.into(),
        }
    }

    pub fn build(
        &self,
        images: &[DownloadedItem],
        videos: &[DownloadedItem],
        local_files: &[PathBuf],
        narration: &str,
        description: &str,
    ) -> Result<RenderJob, PlanError> {
        self.build_with_rng(
            images,
            videos,
            local_files,
            narration,
            description,
            &mut rand::thread_rng(),
        )
    }

    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        images: &[DownloadedItem],
        videos: &[DownloadedItem],
        local_files: &[PathBuf],
        narration: &str,
        description: &str,
        rng: &mut R,
    ) -> Result<RenderJob, PlanError> {
        let mut media = collect_entries(images, videos, local_files);
        media.shuffle(rng);

        if media.is_empty() {
            return Err(PlanError::EmptyPlan);
        }

        Ok(RenderJob {
            media,
            narration: narration.to_string(),
            title: description.to_string(),
            output_path: self.next_output_path().to_string_lossy().to_string(),
        })
    }

    /// `video_<utc timestamp>_<random suffix>.mp4` inside the output directory
    fn next_output_path(&self) -> PathBuf {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ");
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        self.output_dir
            .join(format!("video_{}_{}.mp4", timestamp, &suffix[..8]))
    }
}

/// Flat, unshuffled plan entries. Remote-only videos are left out because the
/// renderer cannot fetch them.
fn collect_entries(
    images: &[DownloadedItem],
    videos: &[DownloadedItem],
    local_files: &[PathBuf],
) -> Vec<MediaPlanEntry> {
    let images = images
        .iter()
        .filter(|i| !i.is_remote_only)
        .filter_map(|i| i.local_path.clone())
        .map(|path| MediaPlanEntry {
            path,
            media_type: MediaType::Image,
        });

    let videos = videos
        .iter()
        .filter(|v| !v.is_remote_only)
        .filter_map(|v| v.local_path.clone())
        .map(|path| MediaPlanEntry {
            path,
            media_type: MediaType::Video,
        });

    let local = local_files.iter().map(|path| MediaPlanEntry {
        path: path.to_string_lossy().to_string(),
        media_type: MediaType::from_path(path),
    });

    images.chain(videos).chain(local).collect()
}
