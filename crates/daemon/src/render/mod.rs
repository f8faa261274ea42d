use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, warn};

use crate::error::PipelineError;
use engine::plan::RenderJob;
use engine::render::{job_description, parse_outcome, parse_success_marker};

/// Turns a render job into a finished video
#[async_trait]
pub trait Renderer: Send + Sync {
    /// `Ok(None)` means the renderer reported success without saying where
    /// the file went.
    async fn dispatch(&self, job: &RenderJob) -> Result<Option<PathBuf>, PipelineError>;
}

/// Runs an external renderer process.
///
/// The process receives two extra arguments: the job description file and a
/// path where it may write `{"output_path": ...}`. Without that file the
/// `Video created successfully: <path>` line in stdout is used instead.
pub struct RenderDispatcher {
    command: Vec<String>,
    scratch_dir: PathBuf,
    timeout: Duration,
}

impl RenderDispatcher {
    pub fn new(command: Vec<String>, scratch_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        RenderDispatcher {
            command,
            scratch_dir: scratch_dir.into(),
            timeout,
        }
    }

    async fn run(&self, job_path: &Path, result_path: &Path) -> Result<Option<PathBuf>, PipelineError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| PipelineError::render("no renderer command configured", ""))?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .arg(job_path)
            .arg(result_path)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(result) => result.map_err(|e| {
                PipelineError::render(format!("failed to start renderer {}", program), e.to_string())
            })?,
            Err(_) => {
                return Err(PipelineError::render(
                    format!("renderer timed out after {}s", self.timeout.as_secs()),
                    "",
                ));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            let diagnostics = if stderr.trim().is_empty() { stdout.trim() } else { stderr.trim() };
            warn!("[Render] Renderer failed ({}): {}", output.status, diagnostics);
            return Err(PipelineError::render(
                format!("renderer exited with {}", output.status),
                diagnostics,
            ));
        }

        if let Ok(contents) = tokio::fs::read_to_string(result_path).await {
            if let Some(path) = parse_outcome(&contents) {
                return Ok(Some(path));
            }
            warn!("[Render] Ignoring unreadable result file {:?}", result_path);
        }

        Ok(parse_success_marker(&stdout))
    }
}

#[async_trait]
impl Renderer for RenderDispatcher {
    async fn dispatch(&self, job: &RenderJob) -> Result<Option<PathBuf>, PipelineError> {
        tokio::fs::create_dir_all(&self.scratch_dir).await?;

        let run_id = uuid::Uuid::new_v4().simple().to_string();
        let job_path = self.scratch_dir.join(format!("render_job_{}.json", run_id));
        let result_path = self.scratch_dir.join(format!("render_result_{}.json", run_id));

        let description = job_description(job)
            .map_err(|e| PipelineError::render("failed to serialize render job", e.to_string()))?;
        tokio::fs::write(&job_path, description).await?;

        info!(
            "[Render] Dispatching {} media entries to {:?}",
            job.media().len(),
            self.command.first()
        );
        let result = self.run(&job_path, &result_path).await;

        let _ = tokio::fs::remove_file(&job_path).await;
        let _ = tokio::fs::remove_file(&result_path).await;

        match &result {
            Ok(Some(path)) => info!("[Render] Video written to {:?}", path),
            Ok(None) => warn!("[Render] Renderer succeeded without reporting an output path"),
            Err(_) => {}
        }
        result
    }
}
