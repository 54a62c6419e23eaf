use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single article as returned by the provider's structured output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    pub category: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Web citation attached to a grounding chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingWeb {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Citation record returned alongside a search-grounded answer. Only the
/// `web` part is inspected; anything else the provider sends is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<GroundingWeb>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResult {
    pub news: Vec<NewsItem>,
    pub sources: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("API key is missing; set GEMINI_API_KEY or API_KEY")]
    Configuration,

    #[error("provider error: {0}")]
    Provider(String),

    #[error("malformed provider response: {0}")]
    Parse(String),
}

/// Source of news batches. One call to `fetch_latest_news` is one outbound
/// request; implementations never retry.
pub trait NewsFetcher: Send + Sync {
    fn fetch_latest_news(&self) -> BoxFuture<'_, Result<FetchResult, FetchError>>;
}
