use std::sync::Arc;
use tracing::{error, info};

use crate::events::EventSummary;

use super::api::GatewayApi;

#[derive(Debug, Clone, PartialEq)]
pub enum FavoriteToggle {
    Added,
    Removed(EventSummary),
}

/// In-memory favorites list, synced from the gateway. Local changes apply
/// immediately; the matching server write is awaited but a failure is only
/// logged, so the last local write wins.
pub struct FavoritesCache {
    api: Arc<dyn GatewayApi>,
    items: Vec<EventSummary>,
}

impl FavoritesCache {
    pub fn new(api: Arc<dyn GatewayApi>) -> Self {
        Self {
            api,
            items: Vec::new(),
        }
    }

    /// Replaces the local list with the server's. On failure the local list
    /// is kept.
    pub async fn sync(&mut self) {
        match self.api.list_favorites().await {
            Ok(items) => {
                info!("Synced {} favorites", items.len());
                self.items = items;
            }
            Err(e) => error!("Failed to sync favorites from server: {:#}", e),
        }
    }

    pub fn items(&self) -> &[EventSummary] {
        &self.items
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.items.iter().any(|e| e.id == id)
    }

    /// Adds `event` unless already present. Returns whether it was added.
    pub async fn add(&mut self, event: EventSummary) -> bool {
        if self.is_favorite(&event.id) {
            return false;
        }
        if let Err(e) = self.api.add_favorite(&event).await {
            error!("Failed to POST favorite {}: {:#}", event.id, e);
        }
        self.items.push(event);
        true
    }

    pub async fn remove(&mut self, id: &str) -> Option<EventSummary> {
        let position = self.items.iter().position(|e| e.id == id);
        let removed = position.map(|p| self.items.remove(p));
        if let Err(e) = self.api.remove_favorite(id).await {
            error!("Failed to DELETE favorite {}: {:#}", id, e);
        }
        removed
    }

    pub async fn toggle(&mut self, event: &EventSummary) -> FavoriteToggle {
        if self.is_favorite(&event.id) {
            let removed = self.remove(&event.id).await;
            FavoriteToggle::Removed(removed.unwrap_or_else(|| event.clone()))
        } else {
            self.add(event.clone()).await;
            FavoriteToggle::Added
        }
    }
}
