//! Document sources — where the three raw JSON documents come from.

use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use idlescape_core::Document;
use idlescape_core::config::SourceConfig;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FetchError;

/// Something that can produce a raw document.
pub trait DocumentSource {
    /// Fetch and parse one document.
    fn fetch(&self, document: Document) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Fetches documents over HTTP(S) from `{base_url}/{path}`.
pub struct HttpSource {
    http: Client,
    source: SourceConfig,
    timeout: Duration,
}

impl HttpSource {
    /// Create an HTTP source for the given configuration.
    #[must_use]
    pub fn new(source: SourceConfig) -> Self {
        Self::with_client(Client::new(), source)
    }

    /// Create an HTTP source that sends requests through `http`.
    #[must_use]
    pub fn with_client(http: Client, source: SourceConfig) -> Self {
        Self {
            http,
            timeout: Duration::from_millis(source.request_timeout_ms),
            source,
        }
    }

    /// Full URL of a document.
    #[must_use]
    pub fn url(&self, document: Document) -> String {
        format!(
            "{}/{}",
            self.source.base_url.trim_end_matches('/'),
            document.path(&self.source).trim_start_matches('/')
        )
    }

    /// Classify a transport error; timeouts carry the configured limit.
    fn request_error(&self, document: Document, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            warn!(document = %document, "Request timed out after {}ms", self.source.request_timeout_ms);
            FetchError::Timeout(self.source.request_timeout_ms)
        } else {
            FetchError::from(err)
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

impl DocumentSource for HttpSource {
    async fn fetch(&self, document: Document) -> Result<Value, FetchError> {
        let url = self.url(document);
        let start = Instant::now();

        let resp = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.request_error(document, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| self.request_error(document, e))?;
        let value: Value = serde_json::from_str(&body)?;

        debug!(
            document = %document,
            bytes = body.len(),
            latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Fetched document"
        );
        Ok(value)
    }
}

/// Reads documents from a local directory, e.g. a checked-out data snapshot.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
    source: SourceConfig,
}

impl DirSource {
    /// Read documents from `dir` using the default relative paths.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_paths(dir, SourceConfig::default())
    }

    /// Read documents from `dir` using the relative paths in `source`.
    pub fn with_paths(dir: impl Into<PathBuf>, source: SourceConfig) -> Self {
        Self {
            dir: dir.into(),
            source,
        }
    }

    /// Full path of a document.
    #[must_use]
    pub fn path(&self, document: Document) -> PathBuf {
        self.dir.join(document.path(&self.source))
    }
}

impl DocumentSource for DirSource {
    async fn fetch(&self, document: Document) -> Result<Value, FetchError> {
        let path = self.path(document);
        let body = tokio::fs::read_to_string(&path).await?;
        let value: Value = serde_json::from_str(&body)?;
        debug!(document = %document, path = %path.display(), "Read document");
        Ok(value)
    }
}
