// src/feed.rs
use anyhow::{Context, Result};

/// One item of the release feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
}

/// Where release entries come from. The poller only sees this trait, so
/// tests can substitute a fixed list of entries.
pub trait FeedSource {
    /// Fetch the entries of the feed at `url`, newest first.
    fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>>;
}

/// Fetches and parses an RSS document over HTTP.
pub struct HttpFeed {
    agent: ureq::Agent,
}

impl HttpFeed {
    pub fn new() -> Self {
        Self {
            agent: crate::http_agent(),
        }
    }
}

impl Default for HttpFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedSource for HttpFeed {
    fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>> {
        let mut response = self
            .agent
            .get(url)
            .call()
            .with_context(|| format!("GET {url} failed"))?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("GET {url} returned HTTP {}", status.as_u16());
        }
        let body = response
            .body_mut()
            .read_to_string()
            .context("Failed to read feed body")?;
        parse_feed(&body)
    }
}

/// Parse an RSS document, keeping entries in document order. Missing titles
/// or links become empty strings.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let channel = rss::Channel::read_from(xml.as_bytes()).context("Failed to parse RSS feed")?;
    Ok(channel
        .items()
        .iter()
        .map(|item| FeedEntry {
            title: item.title().unwrap_or_default().to_string(),
            link: item.link().unwrap_or_default().to_string(),
        })
        .collect())
}
