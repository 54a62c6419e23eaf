pub mod gemini;
pub mod news;

pub use gemini::GeminiClient;
pub use news::{FetchError, FetchResult, GroundingChunk, GroundingWeb, NewsFetcher, NewsItem};
