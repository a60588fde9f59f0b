//! Event Finder Library
//!
//! Gateway server, favorites persistence and the client application logic
//! shared by the `cli-events` front end and the integration tests.

pub mod client;
pub mod config;
pub mod events;
pub mod favorites;
pub mod server;
pub mod sqlite_persistence;
pub mod upstream;

// Re-export commonly used types for convenience
pub use events::{EventSearch, EventSummary};
pub use favorites::{FavoritesStore, SqliteFavoritesStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerState};
