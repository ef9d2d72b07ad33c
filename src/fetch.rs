//! Loading event documents and the demo gallery from disk or over HTTP.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use invite_core::EventDocument;
use invite_core::demos::{DemoEntry, parse_demos};
use url::Url;

const USER_AGENT: &str = concat!("invite/", env!("CARGO_PKG_VERSION"));

/// Where an event document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Path(PathBuf),
    Url(Url),
}

impl DocumentSource {
    /// `http(s)` urls are fetched; anything else is a local path.
    pub fn parse(source: &str) -> Self {
        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => DocumentSource::Url(url),
            _ => DocumentSource::Path(PathBuf::from(source)),
        }
    }

    pub async fn read(&self) -> Result<String> {
        match self {
            DocumentSource::Path(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
            DocumentSource::Url(url) => fetch_text(url).await,
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Path(path) => write!(f, "{}", path.display()),
            DocumentSource::Url(url) => write!(f, "{url}"),
        }
    }
}

pub async fn load_document(source: &DocumentSource) -> Result<EventDocument> {
    tracing::debug!(%source, "Loading event document");
    let content = source.read().await?;
    EventDocument::from_json(&content).with_context(|| format!("Failed to parse {source}"))
}

/// The demo gallery. Failures are logged and give an empty gallery.
pub async fn fetch_demos(url: &str) -> Vec<DemoEntry> {
    let content = match Url::parse(url) {
        Ok(url) => fetch_text(&url).await,
        Err(e) => Err(e.into()),
    };

    match content {
        Ok(content) => parse_demos(&content),
        Err(e) => {
            tracing::warn!(url, error = %e, "Failed to fetch demo list");
            Vec::new()
        }
    }
}

fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

async fn fetch_text(url: &Url) -> Result<String> {
    let response = http_client()?
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("Failed to fetch {url}"))?;

    if !response.status().is_success() {
        bail!("Failed to fetch {} (HTTP {})", url, response.status());
    }

    Ok(response.text().await?)
}
