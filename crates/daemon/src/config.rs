use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use engine::keywords::DEFAULT_MAX_KEYWORDS;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub output_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub max_images: usize,
    pub max_videos: usize,
    pub max_keywords: usize,
    pub pexels_api_key: Option<String>,
    pub unsplash_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    /// Program followed by its leading arguments
    pub renderer_command: Vec<String>,
    pub http_timeout: Duration,
    pub render_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Unset keys and
    /// unparsable numbers fall back to defaults; empty strings count as unset.
    /// `RENDERER_COMMAND` has no default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let number = |key: &str, default: u64| {
            get(key).and_then(|v| v.parse::<u64>().ok()).unwrap_or(default)
        };

        let ip = get("BIND_ADDR")
            .and_then(|v| v.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let port = get("PORT").and_then(|v| v.parse::<u16>().ok()).unwrap_or(3000);

        let renderer_command: Vec<String> = get("RENDERER_COMMAND")
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .ok_or(ConfigError::Missing("RENDERER_COMMAND"))?;

        Ok(Config {
            bind_addr: SocketAddr::new(ip, port),
            output_dir: PathBuf::from(get("OUTPUT_DIRECTORY").unwrap_or_else(|| "./output".to_string())),
            temp_dir: PathBuf::from(get("TEMP_DIRECTORY").unwrap_or_else(|| "./temp".to_string())),
            max_images: number("MAX_IMAGES", 10) as usize,
            max_videos: number("MAX_VIDEOS", 5) as usize,
            max_keywords: number("MAX_KEYWORDS", DEFAULT_MAX_KEYWORDS as u64) as usize,
            pexels_api_key: get("PEXELS_API_KEY"),
            unsplash_api_key: get("UNSPLASH_API_KEY"),
            youtube_api_key: get("YOUTUBE_API_KEY"),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            renderer_command,
            http_timeout: Duration::from_secs(number("HTTP_TIMEOUT_SECS", 30)),
            render_timeout: Duration::from_secs(number("RENDER_TIMEOUT_SECS", 600)),
        })
    }

    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        std::fs::create_dir_all(&self.temp_dir)?;
        Ok(())
    }
}
