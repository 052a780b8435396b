//! Retrieval of JSON documents from HTTP(S) URLs or local paths.

use crate::error::LoadError;
use regex::Regex;
use reqwest::header::CACHE_CONTROL;
use serde_json::Value;
use std::future::Future;
use std::sync::LazyLock;

static ABSOLUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(https?:)?//").expect("valid url regex"));

/// Source of JSON documents.
///
/// Every call must hit the underlying source; implementations do not cache.
pub trait Fetcher: Send + Sync {
    fn fetch_json(&self, url: &str) -> impl Future<Output = Result<Value, LoadError>> + Send;
}

/// Default fetcher: `http(s)://` locations go over the network, anything else
/// is read from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct SourceFetcher {
    client: reqwest::Client,
}

impl SourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    async fn fetch_remote(&self, url: &str) -> Result<Value, LoadError> {
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| LoadError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| LoadError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        parse_json(url, &body)
    }

    async fn read_local(&self, path: &str) -> Result<Value, LoadError> {
        let body = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LoadError::Transport {
                url: path.to_string(),
                reason: e.to_string(),
            })?;
        parse_json(path, &body)
    }
}

impl Fetcher for SourceFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, LoadError> {
        tracing::debug!("Fetching {}", url);
        if is_remote(url) {
            self.fetch_remote(url).await
        } else {
            self.read_local(url).await
        }
    }
}

fn parse_json(url: &str, body: &str) -> Result<Value, LoadError> {
    serde_json::from_str(body).map_err(|e| LoadError::Parse {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn is_remote(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolves a manifest entry against the docs directory.
///
/// Absolute URLs and paths starting with `/`, `./` or `../` are used as-is.
pub fn join_url(dir: &str, file: &str) -> String {
    if dir.is_empty() || ABSOLUTE_URL.is_match(file) {
        return file.to_string();
    }
    if file.starts_with('/') || file.starts_with("./") || file.starts_with("../") {
        return file.to_string();
    }
    format!(
        "{}/{}",
        dir.trim_end_matches('/'),
        file.trim_start_matches('/')
    )
}
