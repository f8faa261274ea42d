use thiserror::Error;

use engine::plan::PlanError;

/// Failures that end a video request
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Keyword extraction failed: {0}")]
    Extraction(String),

    #[error("No valid media files were found")]
    EmptyPlan,

    #[error("Render failed: {message}")]
    Render { message: String, diagnostics: String },

    #[error("Pipeline setup failed: {0}")]
    Setup(#[from] std::io::Error),
}

impl From<PlanError> for PipelineError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::EmptyPlan => PipelineError::EmptyPlan,
        }
    }
}

impl PipelineError {
    pub fn render(message: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        PipelineError::Render {
            message: message.into(),
            diagnostics: diagnostics.into(),
        }
    }
}

/// A provider search that could not produce results
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} API key is not configured")]
    MissingCredentials(&'static str),

    #[error("{0} does not serve {1} content")]
    UnsupportedKind(&'static str, &'static str),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed payload: {0}")]
    Payload(String),
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(u16),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Startup configuration that cannot be used
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}
