use std::sync::{Arc, Mutex};
use tracing::debug;

use super::api::GatewayApi;
use super::debounce::{Debouncer, SUGGEST_DEBOUNCE};

pub const MAX_VISIBLE_SUGGESTIONS: usize = 6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionState {
    pub open: bool,
    pub loading: bool,
    pub items: Vec<String>,
}

/// Keyword autocomplete dropdown.
pub struct SuggestionBox {
    api: Arc<dyn GatewayApi>,
    debouncer: Debouncer,
    state: Arc<Mutex<SuggestionState>>,
}

impl SuggestionBox {
    pub fn new(api: Arc<dyn GatewayApi>) -> Self {
        Self {
            api,
            debouncer: Debouncer::new(SUGGEST_DEBOUNCE),
            state: Arc::new(Mutex::new(SuggestionState::default())),
        }
    }

    fn update<F: FnOnce(&mut SuggestionState)>(state: &Mutex<SuggestionState>, f: F) {
        let mut guard = state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard);
    }

    /// Called on every keystroke. A blank input closes the dropdown at once.
    pub fn on_input(&mut self, text: &str) {
        let keyword = text.trim().to_string();
        if keyword.is_empty() {
            self.close();
            return;
        }

        let api = self.api.clone();
        let state = self.state.clone();
        self.debouncer.schedule(async move {
            Self::update(&state, |s| s.loading = true);
            let result = api.suggest(&keyword).await;
            Self::update(&state, |s| {
                s.loading = false;
                match result {
                    Ok(mut items) => {
                        items.truncate(MAX_VISIBLE_SUGGESTIONS);
                        s.open = !items.is_empty();
                        s.items = items;
                    }
                    Err(e) => {
                        debug!("Suggestions for {:?} failed: {:#}", keyword, e);
                        s.open = false;
                        s.items.clear();
                    }
                }
            });
        });
    }

    /// Picks the suggestion at `index`, closing the dropdown.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let picked = self.snapshot().items.get(index).cloned();
        if picked.is_some() {
            self.close();
        }
        picked
    }

    pub fn close(&mut self) {
        self.debouncer.cancel();
        Self::update(&self.state, |s| *s = SuggestionState::default());
    }

    /// A fetch is scheduled or in flight.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn snapshot(&self) -> SuggestionState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
