//! Clients for the third-party APIs the gateway proxies.

pub mod ipinfo;
pub mod spotify;
pub mod ticketmaster;

pub use ipinfo::{IpInfoClient, IpLocation};
pub use spotify::{SpotifyAlbum, SpotifyArtist, SpotifyClient, SpotifyCredentials};
pub use ticketmaster::TicketmasterClient;

use anyhow::Context;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TICKETMASTER_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";
pub const DEFAULT_SPOTIFY_ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_SPOTIFY_API_BASE_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_IPINFO_BASE_URL: &str = "https://ipinfo.io";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream responded with status {status}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected upstream response: {0}")]
    InvalidResponse(String),
}

impl UpstreamError {
    /// The status the upstream answered with, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Transport(e) => e.status(),
            UpstreamError::InvalidResponse(_) => None,
        }
    }
}

/// Base URLs of every upstream, overridable for staging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEndpoints {
    pub ticketmaster: String,
    pub spotify_accounts: String,
    pub spotify_api: String,
    pub ipinfo: String,
}

impl Default for UpstreamEndpoints {
    fn default() -> Self {
        Self {
            ticketmaster: DEFAULT_TICKETMASTER_BASE_URL.to_string(),
            spotify_accounts: DEFAULT_SPOTIFY_ACCOUNTS_BASE_URL.to_string(),
            spotify_api: DEFAULT_SPOTIFY_API_BASE_URL.to_string(),
            ipinfo: DEFAULT_IPINFO_BASE_URL.to_string(),
        }
    }
}

pub fn build_http_client(timeout_sec: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_sec))
        .build()
        .context("Failed to create HTTP client")
}

pub(crate) fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Sends `request`, failing on any non-2xx status, and decodes the JSON body.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, UpstreamError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status { status, body });
    }
    Ok(response.json().await?)
}
