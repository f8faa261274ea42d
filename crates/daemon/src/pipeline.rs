use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::content::{ContentAggregator, HttpFetcher};
use crate::error::PipelineError;
use crate::keywords::KeywordExtractor;
use crate::llm::{CompletionBackend, OpenAiClient};
use crate::providers::{ContentProvider, PexelsProvider, UnsplashProvider, YouTubeProvider};
use crate::render::{RenderDispatcher, Renderer};
use crate::script::ScriptGenerator;
use engine::plan::MediaPlanBuilder;

/// One description-to-video run: keywords, content, narration, plan, render
pub struct Pipeline {
    extractor: KeywordExtractor,
    aggregator: ContentAggregator,
    script: ScriptGenerator,
    planner: MediaPlanBuilder,
    renderer: Arc<dyn Renderer>,
    /// Caller-supplied files must live under this directory
    local_root: PathBuf,
}

impl Pipeline {
    pub fn new(
        extractor: KeywordExtractor,
        aggregator: ContentAggregator,
        script: ScriptGenerator,
        planner: MediaPlanBuilder,
        renderer: Arc<dyn Renderer>,
        local_root: impl Into<PathBuf>,
    ) -> Self {
        Pipeline {
            extractor,
            aggregator,
            script,
            planner,
            renderer,
            local_root: local_root.into(),
        }
    }

    /// Wires the production providers, AI client and renderer from config
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let llm: Arc<dyn CompletionBackend> = Arc::new(OpenAiClient::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
            config.openai_model.clone(),
            config.http_timeout,
        )?);

        // Registration order is the merge order: Pexels, then Unsplash for
        // images; YouTube, then Pexels for videos.
        let providers: Vec<Arc<dyn ContentProvider>> = vec![
            Arc::new(YouTubeProvider::new(http.clone(), config.youtube_api_key.clone())),
            Arc::new(PexelsProvider::new(http.clone(), config.pexels_api_key.clone())),
            Arc::new(UnsplashProvider::new(http.clone(), config.unsplash_api_key.clone())),
        ];

        Ok(Pipeline::new(
            KeywordExtractor::new(llm.clone(), config.max_keywords),
            ContentAggregator::new(
                providers,
                Arc::new(HttpFetcher::new(http)),
                config.temp_dir.clone(),
                config.max_images,
                config.max_videos,
            ),
            ScriptGenerator::new(llm),
            MediaPlanBuilder::new(config.output_dir.clone()),
            Arc::new(RenderDispatcher::new(
                config.renderer_command.clone(),
                config.temp_dir.clone(),
                config.render_timeout,
            )),
            config.temp_dir.clone(),
        ))
    }

    pub async fn create_video(
        &self,
        description: &str,
        local_files: &[PathBuf],
    ) -> Result<Option<PathBuf>, PipelineError> {
        let keywords = self.extractor.extract(description).await?;
        let content = self.aggregator.find_content(&keywords).await?;
        let narration = self.script.generate(description).await;
        let local_files = usable_local_files(&self.local_root, local_files).await;

        let job = self.planner.build(
            &content.images,
            &content.videos,
            &local_files,
            &narration,
            description,
        )?;
        info!(
            "[Pipeline] Plan ready: {} media entries -> {}",
            job.media().len(),
            job.output_path()
        );

        self.renderer.dispatch(&job).await
    }
}

/// Keeps the regular files that resolve inside `root`; everything else is
/// logged and dropped.
async fn usable_local_files(root: &Path, files: &[PathBuf]) -> Vec<PathBuf> {
    if files.is_empty() {
        return Vec::new();
    }
    let root = match tokio::fs::canonicalize(root).await {
        Ok(root) => root,
        Err(e) => {
            warn!("[Pipeline] Local file root {:?} unavailable: {}", root, e);
            return Vec::new();
        }
    };

    let mut usable = Vec::with_capacity(files.len());
    for file in files {
        let resolved = match tokio::fs::canonicalize(file).await {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("[Pipeline] Skipping local file {:?}: {}", file, e);
                continue;
            }
        };
        if !resolved.starts_with(&root) {
            warn!("[Pipeline] Skipping local file {:?}: outside {:?}", file, root);
            continue;
        }
        match tokio::fs::metadata(&resolved).await {
            Ok(meta) if meta.is_file() => usable.push(resolved),
            Ok(_) => warn!("[Pipeline] Skipping local file {:?}: not a regular file", file),
            Err(e) => warn!("[Pipeline] Skipping local file {:?}: {}", file, e),
        }
    }
    usable
}
