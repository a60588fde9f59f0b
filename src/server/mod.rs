pub mod config;
pub mod error;
mod events_routes;
mod favorites_routes;
mod http_layers;
mod location_routes;
pub mod server;
mod spotify_routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use events_routes::EventsQuery;
pub use http_layers::*;
pub use server::{make_app, run_server};
pub use state::ServerState;
