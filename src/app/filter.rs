use super::App;
use crate::api::NewsItem;

/// Sentinel filter id that disables narrowing.
pub const ALL_SOURCES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFilter {
    pub id: &'static str,
    pub label: &'static str,
}

pub const SOURCE_FILTERS: &[SourceFilter] = &[
    SourceFilter {
        id: ALL_SOURCES,
        label: "Todos los Medios",
    },
    SourceFilter {
        id: "Clarín",
        label: "Clarín",
    },
    SourceFilter {
        id: "La Nación",
        label: "La Nación",
    },
    SourceFilter {
        id: "Infobae",
        label: "Infobae",
    },
    SourceFilter {
        id: "Página/12",
        label: "Página/12",
    },
    SourceFilter {
        id: "Ámbito Financiero",
        label: "Ámbito",
    },
];

/// Items whose `source` equals `filter_id` ignoring case, in original order.
/// `ALL_SOURCES` returns every item.
pub fn filter_by_source<'a>(items: &'a [NewsItem], filter_id: &str) -> Vec<&'a NewsItem> {
    if filter_id == ALL_SOURCES {
        return items.iter().collect();
    }
    let wanted = filter_id.to_lowercase();
    items
        .iter()
        .filter(|item| item.source.to_lowercase() == wanted)
        .collect()
}

impl App {
    pub fn active_filter_index(&self) -> usize {
        self.active_filter
    }

    pub fn active_filter_id(&self) -> &'static str {
        SOURCE_FILTERS[self.active_filter].id
    }

    /// Select a filter by id. Unknown ids are rejected and leave the current
    /// filter in place.
    pub fn set_filter(&mut self, id: &str) -> bool {
        match SOURCE_FILTERS.iter().position(|f| f.id == id) {
            Some(index) => {
                self.select_filter(index);
                true
            }
            None => false,
        }
    }

    pub fn select_filter(&mut self, index: usize) {
        if index < SOURCE_FILTERS.len() {
            self.active_filter = index;
            self.selected = 0;
        }
    }

    pub fn next_filter(&mut self) {
        self.select_filter((self.active_filter + 1) % SOURCE_FILTERS.len());
    }

    pub fn prev_filter(&mut self) {
        let len = SOURCE_FILTERS.len();
        self.select_filter((self.active_filter + len - 1) % len);
    }

    pub fn visible_news(&self) -> Vec<&NewsItem> {
        filter_by_source(&self.news_items, self.active_filter_id())
    }
}
