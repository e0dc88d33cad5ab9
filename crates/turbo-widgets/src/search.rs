//! Header search box with debounced suggestions and keyboard selection.

use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::debounce::Debouncer;

/// Search tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Queries must be longer than this many characters to look anything up.
    pub min_query_len: usize,
    pub debounce_ms: u64,
    /// Delay before hiding suggestions on blur, so clicks on them still land.
    pub blur_hide_ms: u64,
    pub max_suggestions: usize,
    /// Fixed suggestion list used when no backend source is wired up.
    pub suggestions: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            debounce_ms: 300,
            blur_hide_ms: 200,
            max_suggestions: 8,
            suggestions: [
                "Electronics",
                "Fashion",
                "Home & Garden",
                "Sports & Outdoors",
                "Books",
                "Toys & Games",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Anything that can produce suggestions for a query.
pub trait SuggestionSource {
    fn suggest(&self, query: &str) -> Vec<String>;
}

/// Case-insensitive substring match over a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggestions {
    items: Vec<String>,
}

impl StaticSuggestions {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }
}

impl SuggestionSource for StaticSuggestions {
    fn suggest(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl<S: SuggestionSource + ?Sized> SuggestionSource for &S {
    fn suggest(&self, query: &str) -> Vec<String> {
        (**self).suggest(query)
    }
}

/// Keys the search input handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

impl SearchKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(SearchKey::ArrowDown),
            "ArrowUp" => Some(SearchKey::ArrowUp),
            "Enter" => Some(SearchKey::Enter),
            "Escape" => Some(SearchKey::Escape),
            _ => None,
        }
    }
}

/// What the host should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Let the browser handle the key.
    Ignored,
    /// Handled here; call `preventDefault`.
    Handled,
    /// Submit the form with this query.
    Submit(String),
}

/// Search box state.
#[derive(Debug, Clone)]
pub struct SearchBox<S> {
    source: S,
    config: SearchConfig,
    query: String,
    suggestions: Vec<String>,
    visible: bool,
    selected: Option<usize>,
    lookup: Debouncer<String>,
    blur_hide: Option<Instant>,
}

impl SearchBox<StaticSuggestions> {
    /// A box backed by the configured suggestion list.
    pub fn from_config(config: SearchConfig) -> Self {
        let source = StaticSuggestions::new(config.suggestions.clone());
        Self::new(source, config)
    }
}

impl<S: SuggestionSource> SearchBox<S> {
    pub fn new(source: S, config: SearchConfig) -> Self {
        let lookup = Debouncer::from_millis(config.debounce_ms);
        Self {
            source,
            config,
            query: String::new(),
            suggestions: Vec::new(),
            visible: false,
            selected: None,
            lookup,
            blur_hide: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn suggestions_visible(&self) -> bool {
        self.visible
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.lookup.deadline(), self.blur_hide) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Input changed. Long enough queries schedule a lookup; short ones hide
    /// the list immediately.
    pub fn input(&mut self, value: &str, now: Instant) {
        self.query = value.trim().to_string();
        if self.query.chars().count() > self.config.min_query_len {
            self.lookup.trigger(self.query.clone(), now);
        } else {
            self.lookup.cancel();
            self.hide();
        }
    }

    /// Run due timers. Returns true when the suggestion list changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(query) = self.lookup.poll(now) {
            let mut found = self.source.suggest(&query);
            found.truncate(self.config.max_suggestions);
            tracing::debug!(query = %query, matches = found.len(), "search suggestions");
            self.visible = !found.is_empty();
            self.suggestions = found;
            self.selected = None;
            changed = true;
        }

        if self.blur_hide.is_some_and(|due| now >= due) {
            self.blur_hide = None;
            changed |= self.visible;
            self.hide();
        }

        changed
    }

    pub fn focus(&mut self) {
        self.blur_hide = None;
    }

    pub fn blur(&mut self, now: Instant) {
        self.blur_hide = Some(now + Duration::from_millis(self.config.blur_hide_ms));
    }

    pub fn key(&mut self, key: SearchKey) -> KeyOutcome {
        match key {
            SearchKey::ArrowDown if self.visible => {
                let last = self.suggestions.len().saturating_sub(1);
                self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
                KeyOutcome::Handled
            }
            SearchKey::ArrowUp if self.visible => {
                self.selected = self.selected.and_then(|i| i.checked_sub(1));
                KeyOutcome::Handled
            }
            SearchKey::Enter => match self.selected {
                Some(index) if self.visible => self
                    .pick(index)
                    .map(KeyOutcome::Submit)
                    .unwrap_or(KeyOutcome::Ignored),
                _ => KeyOutcome::Ignored,
            },
            SearchKey::Escape => {
                self.hide();
                KeyOutcome::Ignored
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// A suggestion was chosen: it becomes the query and the form submits.
    pub fn pick(&mut self, index: usize) -> Option<String> {
        let choice = self.suggestions.get(index)?.clone();
        self.query = choice.clone();
        self.lookup.cancel();
        self.hide();
        Some(choice)
    }

    /// Form submit. `None` means the query is empty and submission is blocked.
    pub fn submit(&mut self) -> Option<String> {
        let query = self.query.trim();
        if query.is_empty() {
            return None;
        }
        let query = query.to_string();
        self.lookup.cancel();
        self.hide();
        Some(query)
    }

    fn hide(&mut self) {
        self.visible = false;
        self.selected = None;
    }
}
