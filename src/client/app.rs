use anyhow::Result;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::events::EventSummary;

use super::api::GatewayApi;
use super::detail_view::{DetailTab, DetailView};
use super::favorites::{FavoriteToggle, FavoritesCache};
use super::search::{SearchForm, SearchSession};
use super::suggestions::SuggestionBox;
use super::toast::{Toast, ToastAction, ToastBus};

pub const LOCATION_FAILED_MESSAGE: &str =
    "Failed to auto-detect location. Please enter it manually.";
const DETAIL_FAVORITE_SUB_MESSAGE: &str = "You can view it in the Favorites page.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Please enter a keyword")]
    MissingKeyword,

    #[error("Please enter a location")]
    MissingLocation,

    #[error("Detecting location, please try again in a moment.")]
    LocationPending,
}

/// The client application: search, favorites and event detail views over
/// one gateway connection.
pub struct EventApp {
    api: Arc<dyn GatewayApi>,
    toasts: ToastBus,
    pub form: SearchForm,
    results: Vec<EventSummary>,
    session: SearchSession,
    location_error: Option<String>,
    favorites: FavoritesCache,
    suggestions: SuggestionBox,
    detail: Option<DetailView>,
    pending_undo: Option<ToastAction>,
}

impl EventApp {
    pub fn new(api: Arc<dyn GatewayApi>, toasts: ToastBus) -> Self {
        Self {
            favorites: FavoritesCache::new(api.clone()),
            suggestions: SuggestionBox::new(api.clone()),
            api,
            toasts,
            form: SearchForm::default(),
            results: Vec::new(),
            session: SearchSession::default(),
            location_error: None,
            detail: None,
            pending_undo: None,
        }
    }

    /// Startup: pulls favorites, then restores the last search or, with
    /// auto-detect on, locates the user.
    pub async fn init(&mut self) {
        self.favorites.sync().await;
        if !self.restore_search() && self.form.auto_detect {
            self.detect_location().await;
        }
    }

    pub fn toasts(&self) -> &ToastBus {
        &self.toasts
    }

    pub fn results(&self) -> &[EventSummary] {
        &self.results
    }

    pub fn location_error(&self) -> Option<&str> {
        self.location_error.as_deref()
    }

    pub fn favorites(&self) -> &FavoritesCache {
        &self.favorites
    }

    /// Favorites page: reloads the list from the server.
    pub async fn refresh_favorites(&mut self) -> &[EventSummary] {
        self.favorites.sync().await;
        self.favorites.items()
    }

    pub fn suggestions(&mut self) -> &mut SuggestionBox {
        &mut self.suggestions
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    /// Back to the search view with the last search, if there was one.
    pub fn restore_search(&mut self) -> bool {
        match self.session.restore() {
            Some((form, results)) => {
                self.form = form.clone();
                self.results = results.to_vec();
                true
            }
            None => false,
        }
    }

    pub async fn set_auto_detect(&mut self, enabled: bool) {
        self.form.auto_detect = enabled;
        self.location_error = None;
        if enabled {
            self.form.city.clear();
            self.detect_location().await;
        } else {
            self.form.lat = None;
            self.form.lon = None;
        }
    }

    /// On failure auto-detect is switched off and the user asked to type a
    /// location instead.
    pub async fn detect_location(&mut self) -> bool {
        self.location_error = None;
        match self.api.ip_location().await {
            Ok(location) => {
                info!("Auto-detected location: {:?}", location);
                self.form.lat = Some(location.lat);
                self.form.lon = Some(location.lon);
                true
            }
            Err(e) => {
                error!("Location lookup failed: {:#}", e);
                self.location_error = Some(LOCATION_FAILED_MESSAGE.to_string());
                self.form.auto_detect = false;
                self.form.lat = None;
                self.form.lon = None;
                false
            }
        }
    }

    /// Runs the search described by the form. An upstream failure yields
    /// no results rather than an error.
    pub async fn search(&mut self) -> Result<&[EventSummary], SearchError> {
        if self.form.keyword.trim().is_empty() {
            return Err(SearchError::MissingKeyword);
        }
        if self.form.auto_detect {
            if !self.form.has_coordinates() {
                self.location_error = Some(SearchError::LocationPending.to_string());
                return Err(SearchError::LocationPending);
            }
        } else if self.form.city.trim().is_empty() {
            return Err(SearchError::MissingLocation);
        }

        let form = self.form.normalized();
        self.suggestions.close();
        self.results = match self.api.search_events(&form.to_params()).await {
            Ok(events) => events,
            Err(e) => {
                warn!("Search failed: {:#}", e);
                Vec::new()
            }
        };
        info!("Search returned {} events", self.results.len());
        self.session.record(form, self.results.clone());
        Ok(&self.results)
    }

    /// Loads the detail view of `id`, replacing any previous one.
    pub async fn open_detail(&mut self, id: &str) -> Result<&DetailView> {
        let view = DetailView::load(self.api.as_ref(), id).await?;
        Ok(&*self.detail.insert(view))
    }

    pub async fn set_detail_tab(&mut self, tab: DetailTab) -> Option<&DetailView> {
        let view = self.detail.as_mut()?;
        view.set_tab(self.api.as_ref(), tab).await;
        Some(&*view)
    }

    /// Heart button on a search result or favorites entry.
    pub async fn toggle_favorite(&mut self, event: EventSummary) -> FavoriteToggle {
        self.toggle_with_toast(event, None).await
    }

    /// Heart button on the detail page.
    pub async fn toggle_detail_favorite(&mut self) -> Option<FavoriteToggle> {
        let summary = self.detail.as_ref()?.detail.to_summary();
        Some(
            self.toggle_with_toast(summary, Some(DETAIL_FAVORITE_SUB_MESSAGE))
                .await,
        )
    }

    async fn toggle_with_toast(
        &mut self,
        event: EventSummary,
        added_sub_message: Option<&str>,
    ) -> FavoriteToggle {
        let outcome = self.favorites.toggle(&event).await;
        match &outcome {
            FavoriteToggle::Added => {
                let mut toast = Toast::success(format!("{} added to favorites!", event.name));
                if let Some(sub_message) = added_sub_message {
                    toast = toast.with_sub_message(sub_message);
                }
                self.pending_undo = None;
                self.toasts.show(toast);
            }
            FavoriteToggle::Removed(removed) => {
                let action = ToastAction::UndoRemove(removed.clone());
                self.pending_undo = Some(action.clone());
                self.toasts.show(
                    Toast::info(format!("{} removed from favorites!", event.name))
                        .with_action(action),
                );
            }
        }
        outcome
    }

    /// Runs the action of the last removal toast, once.
    pub async fn undo(&mut self) -> bool {
        let Some(ToastAction::UndoRemove(event)) = self.pending_undo.take() else {
            return false;
        };
        self.toasts.clear();
        let name = event.name.clone();
        self.favorites.add(event).await;
        self.toasts
            .show(Toast::success(format!("{} added back to favorites!", name)));
        true
    }
}
