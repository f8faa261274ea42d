use async_trait::async_trait;
use std::path::Path;

use crate::error::DownloadError;

/// Fetches a remote file and writes it to a local path
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_to(&self, url: &str, dest: &Path) -> Result<(), DownloadError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        HttpFetcher { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_to(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        Ok(())
    }
}
