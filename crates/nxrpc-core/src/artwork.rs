//! Cover art existence probe.

use std::time::Duration;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("probe failed: {0}")]
    Other(String),
}

/// Checks whether an artwork URL can be referenced.
#[async_trait]
pub trait ArtworkProbe: Send + Sync {
    /// Issue a HEAD-style request and return the response status code.
    async fn probe(&self, url: &str) -> Result<u16, ProbeError>;
}

/// HEAD requests over HTTPS.
pub struct HttpArtworkProbe {
    http: reqwest::Client,
}

impl HttpArtworkProbe {
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ArtworkProbe for HttpArtworkProbe {
    async fn probe(&self, url: &str) -> Result<u16, ProbeError> {
        let response = self.http.head(url).send().await?;
        Ok(response.status().as_u16())
    }
}
