use axum::extract::FromRef;

use crate::favorites::FavoritesStore;
use crate::upstream::{IpInfoClient, SpotifyClient, TicketmasterClient};
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedFavoritesStore = Arc<dyn FavoritesStore>;
pub type GuardedTicketmaster = Arc<TicketmasterClient>;
pub type GuardedSpotify = Arc<SpotifyClient>;
pub type GuardedIpInfo = Arc<IpInfoClient>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub favorites_store: GuardedFavoritesStore,
    pub ticketmaster: GuardedTicketmaster,
    pub spotify: GuardedSpotify,
    pub ipinfo: GuardedIpInfo,
    pub hash: String,
}

impl FromRef<ServerState> for GuardedFavoritesStore {
    fn from_ref(input: &ServerState) -> Self {
        input.favorites_store.clone()
    }
}

impl FromRef<ServerState> for GuardedTicketmaster {
    fn from_ref(input: &ServerState) -> Self {
        input.ticketmaster.clone()
    }
}

impl FromRef<ServerState> for GuardedSpotify {
    fn from_ref(input: &ServerState) -> Self {
        input.spotify.clone()
    }
}

impl FromRef<ServerState> for GuardedIpInfo {
    fn from_ref(input: &ServerState) -> Self {
        input.ipinfo.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
