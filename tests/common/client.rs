//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per gateway endpoint.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Event Endpoints
    // ========================================================================

    /// GET /api/events
    pub async fn search_events(&self, params: &[(&str, &str)]) -> Response {
        self.client
            .get(format!("{}/api/events", self.base_url))
            .query(params)
            .send()
            .await
            .expect("Search events request failed")
    }

    /// GET /api/suggest?keyword=
    pub async fn suggest(&self, keyword: &str) -> Response {
        self.client
            .get(format!("{}/api/suggest", self.base_url))
            .query(&[("keyword", keyword)])
            .send()
            .await
            .expect("Suggest request failed")
    }

    /// GET /api/event/{id}
    pub async fn get_event(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/api/event/{}", self.base_url, id))
            .send()
            .await
            .expect("Get event request failed")
    }

    // ========================================================================
    // Spotify Endpoints
    // ========================================================================

    /// GET /api/spotify/search-artist?q=
    pub async fn search_artist(&self, q: &str) -> Response {
        self.client
            .get(format!("{}/api/spotify/search-artist", self.base_url))
            .query(&[("q", q)])
            .send()
            .await
            .expect("Search artist request failed")
    }

    /// GET /api/spotify/artist-albums/{id}
    pub async fn artist_albums(&self, artist_id: &str) -> Response {
        self.client
            .get(format!(
                "{}/api/spotify/artist-albums/{}",
                self.base_url, artist_id
            ))
            .send()
            .await
            .expect("Artist albums request failed")
    }

    // ========================================================================
    // Location Endpoints
    // ========================================================================

    /// GET /api/ip-location
    pub async fn ip_location(&self) -> Response {
        self.client
            .get(format!("{}/api/ip-location", self.base_url))
            .send()
            .await
            .expect("IP location request failed")
    }

    /// GET /api/ip-location behind a proxy that reports `forwarded_for`
    pub async fn ip_location_forwarded(&self, forwarded_for: &str) -> Response {
        self.client
            .get(format!("{}/api/ip-location", self.base_url))
            .header("x-forwarded-for", forwarded_for)
            .send()
            .await
            .expect("IP location request failed")
    }

    // ========================================================================
    // Favorites Endpoints
    // ========================================================================

    /// GET /api/favorites
    pub async fn list_favorites(&self) -> Response {
        self.client
            .get(format!("{}/api/favorites", self.base_url))
            .send()
            .await
            .expect("List favorites request failed")
    }

    /// POST /api/favorites
    pub async fn add_favorite(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/api/favorites", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Add favorite request failed")
    }

    /// POST /api/favorites with a body sent as-is
    pub async fn add_favorite_raw(&self, body: &'static str) -> Response {
        self.client
            .post(format!("{}/api/favorites", self.base_url))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Add favorite request failed")
    }

    /// DELETE /api/favorites/{id}
    pub async fn remove_favorite(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/api/favorites/{}", self.base_url, id))
            .send()
            .await
            .expect("Remove favorite request failed")
    }
}
