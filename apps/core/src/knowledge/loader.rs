//! Fetches and parses the knowledge base document from disk or over HTTP.

use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

use super::schema::KnowledgeBase;
use crate::error::AppError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the knowledge base document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Remote(Url),
}

impl DataSource {
    /// Interprets `raw` as an http(s) URL when it has that scheme, otherwise as a path.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AppError::Validation("data source is empty".to_string()));
        }

        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(DataSource::Remote(Url::parse(raw)?))
        } else {
            Ok(DataSource::File(PathBuf::from(raw)))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Reads and parses the document behind `source`.
#[instrument(skip_all, fields(source = %source))]
pub async fn load_from(source: &DataSource) -> Result<KnowledgeBase, AppError> {
    let body = match source {
        DataSource::File(path) => tokio::fs::read_to_string(path).await?,
        DataSource::Remote(url) => fetch(url).await?,
    };
    debug!(bytes = body.len(), "knowledge document read");

    let kb = parse(&body)?;
    info!(crops = kb.crops.len(), "knowledge base loaded");
    Ok(kb)
}

/// Parses a knowledge base document.
pub fn parse(body: &str) -> Result<KnowledgeBase, AppError> {
    Ok(serde_json::from_str(body)?)
}

async fn fetch(url: &Url) -> Result<String, AppError> {
    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Http(format!("{} returned status {}", url, status)));
    }

    Ok(response.text().await?)
}
