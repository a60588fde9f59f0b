//! Spotify Web API client with a shared client-credentials token.

use super::{fetch_json, trim_base_url, UpstreamError};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A cached token is refreshed once less than this much validity is left.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);
/// Upper bound on the lifetime trusted from a token response.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);
const ALBUMS_LIMIT: u32 = 30;
const ALBUMS_MARKET: &str = "US";
const ALBUMS_INCLUDE_GROUPS: &str = "album,single";

#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
    pub followers: u64,
    pub popularity: Option<u32>,
    pub genres: Vec<String>,
    pub image_url: String,
    pub spotify_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotifyAlbum {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub total_tracks: u32,
    pub image_url: String,
    pub spotify_url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct SpImage {
    url: Option<String>,
}

#[derive(Deserialize)]
struct SpFollowers {
    total: Option<u64>,
}

#[derive(Deserialize)]
struct SpExternalUrls {
    spotify: Option<String>,
}

#[derive(Deserialize)]
struct SpArtist {
    id: String,
    name: String,
    followers: Option<SpFollowers>,
    popularity: Option<u32>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    images: Vec<SpImage>,
    external_urls: Option<SpExternalUrls>,
}

#[derive(Deserialize)]
struct SpAlbum {
    id: String,
    name: String,
    release_date: Option<String>,
    total_tracks: Option<u32>,
    #[serde(default)]
    images: Vec<SpImage>,
    external_urls: Option<SpExternalUrls>,
}

#[derive(Deserialize)]
struct SpPage<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Deserialize)]
struct SpArtistSearch {
    artists: Option<SpPage<SpArtist>>,
}

fn first_image_url(images: &[SpImage]) -> String {
    images
        .first()
        .and_then(|i| i.url.clone())
        .unwrap_or_default()
}

fn profile_url(urls: Option<SpExternalUrls>) -> String {
    urls.and_then(|u| u.spotify).unwrap_or_default()
}

impl From<SpArtist> for SpotifyArtist {
    fn from(a: SpArtist) -> Self {
        Self {
            image_url: first_image_url(&a.images),
            spotify_url: profile_url(a.external_urls),
            id: a.id,
            name: a.name,
            followers: a.followers.and_then(|f| f.total).unwrap_or(0),
            popularity: a.popularity,
            genres: a.genres,
        }
    }
}

impl From<SpAlbum> for SpotifyAlbum {
    fn from(a: SpAlbum) -> Self {
        Self {
            image_url: first_image_url(&a.images),
            spotify_url: profile_url(a.external_urls),
            id: a.id,
            name: a.name,
            release_date: a.release_date.unwrap_or_default(),
            total_tracks: a.total_tracks.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn expiry(requested_at: Instant, expires_in_secs: u64) -> Instant {
        requested_at + Duration::from_secs(expires_in_secs).min(MAX_TOKEN_LIFETIME)
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

pub struct SpotifyClient {
    client: reqwest::Client,
    accounts_base_url: String,
    api_base_url: String,
    credentials: SpotifyCredentials,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(
        client: reqwest::Client,
        accounts_base_url: &str,
        api_base_url: &str,
        credentials: SpotifyCredentials,
    ) -> Self {
        Self {
            client,
            accounts_base_url: trim_base_url(accounts_base_url),
            api_base_url: trim_base_url(api_base_url),
            credentials,
            token: Mutex::new(None),
        }
    }

    fn cached_token(&self) -> Option<String> {
        let guard = self.token.lock().unwrap_or_else(|e| e.into_inner());
        guard
            .as_ref()
            .filter(|t| t.is_fresh(Instant::now()))
            .map(|t| t.access_token.clone())
    }

    /// Returns a bearer token, exchanging client credentials when the cached
    /// one is missing or about to expire. Concurrent callers may each refresh.
    async fn access_token(&self) -> Result<String, UpstreamError> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        debug!("Refreshing Spotify access token");
        let url = format!("{}/api/token", self.accounts_base_url);
        let requested_at = Instant::now();
        let response: TokenResponse = fetch_json(
            self.client
                .post(&url)
                .basic_auth(
                    &self.credentials.client_id,
                    Some(&self.credentials.client_secret),
                )
                .form(&[("grant_type", "client_credentials")]),
        )
        .await?;

        let cached = CachedToken {
            access_token: response.access_token.clone(),
            expires_at: CachedToken::expiry(requested_at, response.expires_in),
        };
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(cached);
        info!(
            "Obtained Spotify access token valid for {}s",
            response.expires_in
        );
        Ok(response.access_token)
    }

    /// Best match for `name`, if any.
    pub async fn search_artist(&self, name: &str) -> Result<Option<SpotifyArtist>, UpstreamError> {
        let token = self.access_token().await?;
        let url = format!("{}/search", self.api_base_url);
        let response: SpArtistSearch = fetch_json(
            self.client
                .get(&url)
                .bearer_auth(token)
                .query(&[("q", name), ("type", "artist"), ("limit", "1")]),
        )
        .await?;

        Ok(response
            .artists
            .and_then(|page| page.items.into_iter().next())
            .map(SpotifyArtist::from))
    }

    pub async fn artist_albums(&self, artist_id: &str) -> Result<Vec<SpotifyAlbum>, UpstreamError> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/artists/{}/albums",
            self.api_base_url,
            urlencoding::encode(artist_id)
        );
        let limit = ALBUMS_LIMIT.to_string();
        let response: SpPage<SpAlbum> = fetch_json(
            self.client.get(&url).bearer_auth(token).query(&[
                ("include_groups", ALBUMS_INCLUDE_GROUPS),
                ("limit", limit.as_str()),
                ("market", ALBUMS_MARKET),
            ]),
        )
        .await?;

        Ok(response.items.into_iter().map(SpotifyAlbum::from).collect())
    }
}
