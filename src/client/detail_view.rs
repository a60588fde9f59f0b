use anyhow::Result;
use tracing::{error, info};

use crate::upstream::{SpotifyAlbum, SpotifyArtist};

use super::api::GatewayApi;
use super::detail::EventDetail;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DetailTab {
    #[default]
    Info,
    Artist,
    Venue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArtistPanel {
    NotLoaded,
    /// The artist was found. `albums_error` is set when only the album
    /// list failed, the artist card stays.
    Loaded {
        artist: SpotifyArtist,
        albums: Vec<SpotifyAlbum>,
        albums_error: Option<String>,
    },
    Failed(String),
}

/// The event detail page: the mapped event, the active tab and the
/// lazily loaded artist tab.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub detail: EventDetail,
    pub active_tab: DetailTab,
    pub artist: ArtistPanel,
}

impl DetailView {
    pub fn new(detail: EventDetail) -> Self {
        Self {
            detail,
            active_tab: DetailTab::Info,
            artist: ArtistPanel::NotLoaded,
        }
    }

    /// Loads and maps the event, starting on the info tab.
    pub async fn load(api: &dyn GatewayApi, id: &str) -> Result<Self> {
        let payload = api.event_details(id).await?;
        Ok(Self::new(EventDetail::from_upstream(payload)?))
    }

    pub fn artist_loaded(&self) -> bool {
        !matches!(self.artist, ArtistPanel::NotLoaded)
    }

    /// Name to look up: the artist/team line, else the event name.
    fn artist_query(&self) -> Option<&str> {
        [self.detail.artist_team.trim(), self.detail.name.trim()]
            .into_iter()
            .find(|n| !n.is_empty() && *n != NOT_AVAILABLE)
    }

    /// Switches tab; the first switch to the artist tab loads it.
    pub async fn set_tab(&mut self, api: &dyn GatewayApi, tab: DetailTab) {
        self.active_tab = tab;
        if tab == DetailTab::Artist && !self.artist_loaded() {
            self.artist = self.load_artist(api).await;
        }
    }

    async fn load_artist(&self, api: &dyn GatewayApi) -> ArtistPanel {
        let Some(name) = self.artist_query() else {
            return ArtistPanel::Failed("Artist name unavailable".to_string());
        };

        let artist = match api.search_artist(name).await {
            Ok(Some(artist)) => artist,
            Ok(None) => return ArtistPanel::Failed("Artist not found on Spotify".to_string()),
            Err(e) => {
                error!("Failed to search artist {:?}: {:#}", name, e);
                return ArtistPanel::Failed("Failed to load artist from Spotify".to_string());
            }
        };

        match api.artist_albums(&artist.id).await {
            Ok(albums) => {
                info!("Loaded {} albums for {}", albums.len(), artist.name);
                ArtistPanel::Loaded {
                    artist,
                    albums,
                    albums_error: None,
                }
            }
            Err(e) => {
                error!("Failed to load albums of {}: {:#}", artist.id, e);
                ArtistPanel::Loaded {
                    artist,
                    albums: Vec::new(),
                    albums_error: Some("Failed to load albums from Spotify".to_string()),
                }
            }
        }
    }
}
