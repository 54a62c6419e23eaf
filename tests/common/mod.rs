#![allow(dead_code)]

use argen_news::api::{FetchError, FetchResult, NewsFetcher, NewsItem};
use argen_news::app::App;
use argen_news::config::Config;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn make_news_item(id: &str, title: &str, source: &str) -> NewsItem {
    NewsItem {
        id: id.to_string(),
        title: title.to_string(),
        summary: format!("Resumen de {}", title),
        url: format!("https://example.com/{}", id),
        source: source.to_string(),
        category: "Política".to_string(),
        published_at: None,
        image_url: None,
    }
}

/// One item per tracked outlet, in outlet order.
pub fn one_per_outlet() -> Vec<NewsItem> {
    vec![
        make_news_item("1", "Sesión en el Congreso", "Clarín"),
        make_news_item("2", "Dólar hoy", "La Nación"),
        make_news_item("3", "Alerta meteorológica", "Infobae"),
        make_news_item("4", "Marcha universitaria", "Página/12"),
        make_news_item("5", "Riesgo país", "Ámbito Financiero"),
    ]
}

/// Fetcher that answers every call with the same canned result and counts calls.
pub struct StubFetcher {
    response: Result<FetchResult, FetchError>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn ok(news: Vec<NewsItem>) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(FetchResult {
                news,
                sources: Vec::new(),
            }),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(error: FetchError) -> Arc<Self> {
        Arc::new(Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NewsFetcher for StubFetcher {
    fn fetch_latest_news(&self) -> BoxFuture<'_, Result<FetchResult, FetchError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

pub fn test_app(fetcher: Arc<StubFetcher>) -> App {
    App::with_fetcher(Config::test_config(), fetcher)
}

/// App whose fetcher returns no news; for tests that set items directly.
pub fn idle_app() -> App {
    test_app(StubFetcher::ok(Vec::new()))
}
