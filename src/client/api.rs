//! HTTP client for the gateway's `/api` surface.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::events::EventSummary;
use crate::upstream::{IpLocation, SpotifyAlbum, SpotifyArtist};

/// Query parameters of `GET /api/events`.
pub type SearchParams = Vec<(&'static str, String)>;

/// Everything the client application asks of the gateway.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    async fn search_events(&self, params: &SearchParams) -> Result<Vec<EventSummary>>;

    async fn suggest(&self, keyword: &str) -> Result<Vec<String>>;

    /// Raw upstream event payload.
    async fn event_details(&self, id: &str) -> Result<Value>;

    async fn ip_location(&self) -> Result<IpLocation>;

    async fn search_artist(&self, name: &str) -> Result<Option<SpotifyArtist>>;

    async fn artist_albums(&self, artist_id: &str) -> Result<Vec<SpotifyAlbum>>;

    async fn list_favorites(&self) -> Result<Vec<EventSummary>>;

    async fn add_favorite(&self, event: &EventSummary) -> Result<()>;

    async fn remove_favorite(&self, id: &str) -> Result<()>;
}

pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// `base_url` is the gateway root, e.g. "http://localhost:8080".
    pub fn new(base_url: &str, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Fails on non-2xx, surfacing the gateway's `{"error": ...}` message.
    async fn check(response: Response, what: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("error")?.as_str().map(str::to_string))
            .unwrap_or_default();
        bail!("Failed to {}: status {} {}", what, status, message)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to {}", what))?;
        Self::check(response, what)
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse response to {}", what))
    }
}

#[async_trait]
impl GatewayApi for GatewayClient {
    async fn search_events(&self, params: &SearchParams) -> Result<Vec<EventSummary>> {
        let query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        self.get_json("/events", &query, "search events").await
    }

    async fn suggest(&self, keyword: &str) -> Result<Vec<String>> {
        self.get_json("/suggest", &[("keyword", keyword)], "fetch suggestions")
            .await
    }

    async fn event_details(&self, id: &str) -> Result<Value> {
        let path = format!("/event/{}", urlencoding::encode(id));
        self.get_json(&path, &[], "fetch event details").await
    }

    async fn ip_location(&self) -> Result<IpLocation> {
        self.get_json("/ip-location", &[], "fetch ip location").await
    }

    async fn search_artist(&self, name: &str) -> Result<Option<SpotifyArtist>> {
        self.get_json("/spotify/search-artist", &[("q", name)], "search artist")
            .await
    }

    async fn artist_albums(&self, artist_id: &str) -> Result<Vec<SpotifyAlbum>> {
        let path = format!("/spotify/artist-albums/{}", urlencoding::encode(artist_id));
        self.get_json(&path, &[], "fetch artist albums").await
    }

    async fn list_favorites(&self) -> Result<Vec<EventSummary>> {
        self.get_json("/favorites", &[], "fetch favorites").await
    }

    async fn add_favorite(&self, event: &EventSummary) -> Result<()> {
        let response = self
            .client
            .post(self.url("/favorites"))
            .json(event)
            .send()
            .await
            .context("Failed to add favorite")?;
        Self::check(response, "add favorite").await?;
        Ok(())
    }

    async fn remove_favorite(&self, id: &str) -> Result<()> {
        let path = format!("/favorites/{}", urlencoding::encode(id));
        let response = self
            .client
            .delete(self.url(&path))
            .send()
            .await
            .context("Failed to remove favorite")?;
        Self::check(response, "remove favorite").await?;
        Ok(())
    }
}
