mod models;
mod schema;
mod sqlite_favorites_store;

pub use models::{Favorite, FavoriteDocument, FavoritesError, UpsertOutcome};
pub use schema::FAVORITES_VERSIONED_SCHEMAS;
pub use sqlite_favorites_store::SqliteFavoritesStore;

pub trait FavoritesStore: Send + Sync {
    /// All favorites, oldest first.
    fn list(&self) -> Result<Vec<Favorite>, FavoritesError>;
    fn upsert(&self, document: FavoriteDocument) -> Result<UpsertOutcome, FavoritesError>;
    fn delete(&self, id: &str) -> Result<(), FavoritesError>;
}
