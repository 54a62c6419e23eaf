use super::{App, AppEvent, FetchPhase, InputMode};
use crate::api::{FetchError, FetchResult};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Shown for every failed refresh, whatever the cause.
pub const FETCH_FAILED_MESSAGE: &str =
    "No se pudieron cargar las noticias. Verifica tu conexión o API Key.";

impl App {
    /// Enter `Loading`. Returns `false` without touching state if a fetch is
    /// already in flight.
    pub fn begin_refresh(&mut self) -> bool {
        if self.is_loading() {
            tracing::debug!("refresh ignored, fetch already in flight");
            return false;
        }
        self.phase = FetchPhase::Loading;
        self.error_message = None;
        self.status_message = None;
        self.selected = 0;
        if self.input_mode == InputMode::NewsDetail {
            self.close_modal();
        }
        true
    }

    /// Apply the outcome of a fetch started by `begin_refresh`.
    pub fn complete_refresh(&mut self, result: Result<FetchResult, FetchError>) {
        match result {
            Ok(result) => {
                tracing::info!(items = result.news.len(), "news refreshed");
                self.news_items = result.news;
                self.grounding_sources = result.sources;
                self.last_updated = Some(Local::now());
                self.error_message = None;
                self.phase = FetchPhase::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "news refresh failed");
                self.news_items.clear();
                self.grounding_sources.clear();
                self.error_message = Some(FETCH_FAILED_MESSAGE.to_string());
                self.phase = FetchPhase::Failed;
            }
        }
        self.selected = 0;
    }

    /// Run a whole refresh cycle inline.
    pub async fn refresh(&mut self) {
        if !self.begin_refresh() {
            return;
        }
        let result = self.fetcher.fetch_latest_news().await;
        self.complete_refresh(result);
    }

    /// Start a refresh on a background task; the result arrives on `tx` as
    /// `AppEvent::NewsFetched`. Returns `false` if a fetch is already running.
    pub fn spawn_refresh(&mut self, tx: &UnboundedSender<AppEvent>) -> bool {
        if !self.begin_refresh() {
            return false;
        }
        let fetcher = Arc::clone(&self.fetcher);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch_latest_news().await;
            let _ = tx.send(AppEvent::NewsFetched(result));
        });
        true
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::NewsFetched(result) => self.complete_refresh(result),
        }
    }
}
