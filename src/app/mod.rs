mod filter;
mod refresh;

pub use filter::{ALL_SOURCES, SOURCE_FILTERS, SourceFilter, filter_by_source};
pub use refresh::FETCH_FAILED_MESSAGE;

use crate::api::{FetchError, FetchResult, GeminiClient, GroundingChunk, NewsFetcher, NewsItem};
use crate::config::Config;
use chrono::{DateTime, Local};
use std::sync::Arc;

/// Number of skeleton cards drawn while a fetch is in flight.
pub const PLACEHOLDER_COUNT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    NewsDetail,
    Sources,
    Help,
}

/// Messages delivered to the event loop from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    NewsFetched(Result<FetchResult, FetchError>),
}

pub struct App {
    pub config: Config,
    pub news_items: Vec<NewsItem>,
    pub grounding_sources: Vec<GroundingChunk>,
    pub phase: FetchPhase,
    pub error_message: Option<String>,
    pub last_updated: Option<DateTime<Local>>,
    pub selected: usize,
    pub input_mode: InputMode,
    pub detail_scroll: usize,
    pub status_message: Option<String>,
    pub tick: usize,
    active_filter: usize,
    fetcher: Arc<dyn NewsFetcher>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let fetcher = Arc::new(GeminiClient::from_config(&config));
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn NewsFetcher>) -> Self {
        Self {
            config,
            news_items: Vec::new(),
            grounding_sources: Vec::new(),
            phase: FetchPhase::Idle,
            error_message: None,
            last_updated: None,
            selected: 0,
            input_mode: InputMode::Normal,
            detail_scroll: 0,
            status_message: None,
            tick: 0,
            active_filter: 0,
            fetcher,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    /// Advance the spinner frame.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn selected_news(&self) -> Option<&NewsItem> {
        if self.is_loading() {
            return None;
        }
        self.visible_news().get(self.selected).copied()
    }

    fn visible_len(&self) -> usize {
        if self.is_loading() {
            0
        } else {
            self.visible_news().len()
        }
    }

    pub fn move_left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        let len = self.visible_len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self, columns: usize) {
        let columns = columns.max(1);
        if self.selected >= columns {
            self.selected -= columns;
        }
    }

    pub fn move_down(&mut self, columns: usize) {
        let columns = columns.max(1);
        if self.selected + columns < self.visible_len() {
            self.selected += columns;
        }
    }

    pub fn open_detail(&mut self) {
        if self.selected_news().is_some() {
            self.detail_scroll = 0;
            self.input_mode = InputMode::NewsDetail;
        }
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn scroll_detail_down(&mut self) {
        self.detail_scroll += 1;
    }

    pub fn show_sources(&mut self) {
        self.input_mode = InputMode::Sources;
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn close_modal(&mut self) {
        self.input_mode = InputMode::Normal;
        self.detail_scroll = 0;
    }

    /// Open the selected article in the system browser.
    pub fn open_selected(&mut self) {
        let Some(url) = self.selected_news().map(|item| item.url.clone()) else {
            return;
        };
        match open::that(&url) {
            Ok(()) => {
                tracing::info!(%url, "opened article in browser");
                self.status_message = Some("Abriendo noticia en el navegador".to_string());
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "could not open browser");
                self.status_message = Some(format!("No se pudo abrir el navegador: {}", e));
            }
        }
    }

    /// Web citations that carry a URI, in provider order.
    pub fn grounding_links(&self) -> Vec<(&str, &str)> {
        self.grounding_sources
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
            .filter_map(|web| {
                let uri = web.uri.as_deref()?;
                Some((web.title.as_deref().unwrap_or(uri), uri))
            })
            .collect()
    }
}
