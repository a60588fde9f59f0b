//! Fake third-party APIs
//!
//! One axum app stands in for the ticketing catalog, the music service
//! (accounts + web API) and the geolocation service. Every route counts its
//! hits so tests can assert on caching and short-circuiting.

use super::constants::*;
use super::fixtures::*;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

type QueryMap = HashMap<String, String>;

#[derive(Default)]
pub struct UpstreamCounters {
    pub search: AtomicUsize,
    pub suggest: AtomicUsize,
    pub details: AtomicUsize,
    pub token: AtomicUsize,
    pub artist_search: AtomicUsize,
    pub albums: AtomicUsize,
    pub ipinfo: AtomicUsize,
}

/// Knobs and recordings shared with the tests.
pub struct FakeUpstreamState {
    pub counters: UpstreamCounters,
    /// `expires_in` of issued tokens, in seconds
    pub token_expires_in: AtomicU64,
    /// Answer every search with this status instead of events
    pub search_failure: Mutex<Option<StatusCode>>,
    /// Drop `loc` from geolocation answers
    pub ipinfo_without_loc: AtomicBool,
    pub last_search_query: Mutex<QueryMap>,
    pub last_albums_query: Mutex<QueryMap>,
    /// `None` for egress lookups
    pub last_ipinfo_ip: Mutex<Option<Option<String>>>,
}

impl Default for FakeUpstreamState {
    fn default() -> Self {
        Self {
            counters: UpstreamCounters::default(),
            token_expires_in: AtomicU64::new(3600),
            search_failure: Mutex::new(None),
            ipinfo_without_loc: AtomicBool::new(false),
            last_search_query: Mutex::new(QueryMap::new()),
            last_albums_query: Mutex::new(QueryMap::new()),
            last_ipinfo_ip: Mutex::new(None),
        }
    }
}

impl FakeUpstreamState {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

type Shared = Arc<FakeUpstreamState>;

fn hit(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"fault": {"faultstring": "Invalid ApiKey"}})),
    )
        .into_response()
}

fn has_api_key(query: &QueryMap) -> bool {
    query.get("apikey").map(String::as_str) == Some(TM_API_KEY)
}

async fn tm_search(State(state): State<Shared>, Query(query): Query<QueryMap>) -> Response {
    hit(&state.counters.search);
    *state.last_search_query.lock().unwrap() = query.clone();
    if !has_api_key(&query) {
        return unauthorized();
    }
    if let Some(status) = *state.search_failure.lock().unwrap() {
        return (status, Json(json!({"errors": [{"detail": "boom"}]}))).into_response();
    }
    if query.get("city").map(String::as_str) == Some(NO_MATCH_CITY) {
        return Json(tm_empty_search_response()).into_response();
    }
    Json(tm_search_response()).into_response()
}

async fn tm_suggest(State(state): State<Shared>, Query(query): Query<QueryMap>) -> Response {
    hit(&state.counters.suggest);
    if !has_api_key(&query) {
        return unauthorized();
    }
    if query.get("keyword").map(String::as_str) == Some(NO_MATCH_KEYWORD) {
        return Json(json!({"_embedded": {}})).into_response();
    }
    if query.get("keyword").map(String::as_str) == Some(MANY_SUGGESTIONS_KEYWORD) {
        return Json(tm_suggest_many_response()).into_response();
    }
    Json(tm_suggest_response()).into_response()
}

async fn tm_event(
    State(state): State<Shared>,
    Path(file): Path<String>,
    Query(query): Query<QueryMap>,
) -> Response {
    hit(&state.counters.details);
    if !has_api_key(&query) {
        return unauthorized();
    }
    let id = file.strip_suffix(".json").unwrap_or(&file);
    match tm_event_detail(id) {
        Some(event) => Json(event).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"errors": [{"code": "DIS1004", "detail": "Resource not found"}]})),
        )
            .into_response(),
    }
}

async fn spotify_token(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(form): Form<QueryMap>,
) -> Response {
    hit(&state.counters.token);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Basic "));
    if !authorized || form.get("grant_type").map(String::as_str) != Some("client_credentials") {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_client"}))).into_response();
    }
    Json(json!({
        "access_token": SPOTIFY_ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": state.token_expires_in.load(Ordering::SeqCst)
    }))
    .into_response()
}

fn has_bearer(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", SPOTIFY_ACCESS_TOKEN))
}

async fn spotify_search(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<QueryMap>,
) -> Response {
    hit(&state.counters.artist_search);
    if !has_bearer(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let q = query.get("q").cloned().unwrap_or_default();
    Json(spotify_artist_search(&q)).into_response()
}

async fn spotify_albums_route(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<QueryMap>,
) -> Response {
    hit(&state.counters.albums);
    *state.last_albums_query.lock().unwrap() = query;
    if !has_bearer(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id == BROKEN_ARTIST_ID {
        return StatusCode::BAD_GATEWAY.into_response();
    }
    Json(spotify_albums()).into_response()
}

fn ipinfo_answer(state: &FakeUpstreamState, ip: Option<String>, query: &QueryMap) -> Response {
    hit(&state.counters.ipinfo);
    *state.last_ipinfo_ip.lock().unwrap() = Some(ip.clone());
    if query.get("token").map(String::as_str) != Some(IPINFO_TOKEN) {
        return StatusCode::FORBIDDEN.into_response();
    }
    let mut body = ipinfo_response(ip.as_deref());
    if state.ipinfo_without_loc.load(Ordering::SeqCst) {
        if let Some(obj) = body.as_object_mut() {
            obj.remove("loc");
        }
    }
    Json(body).into_response()
}

async fn ipinfo_egress(State(state): State<Shared>, Query(query): Query<QueryMap>) -> Response {
    ipinfo_answer(&state, None, &query)
}

async fn ipinfo_ip(
    State(state): State<Shared>,
    Path(ip): Path<String>,
    Query(query): Query<QueryMap>,
) -> Response {
    ipinfo_answer(&state, Some(ip), &query)
}

fn make_fake_upstream_app(state: Shared) -> Router {
    Router::new()
        .route("/discovery/v2/events.json", get(tm_search))
        .route("/discovery/v2/suggest.json", get(tm_suggest))
        .route("/discovery/v2/events/{file}", get(tm_event))
        .route("/spotify-accounts/api/token", post(spotify_token))
        .route("/spotify/v1/search", get(spotify_search))
        .route("/spotify/v1/artists/{id}/albums", get(spotify_albums_route))
        .route("/ipinfo/json", get(ipinfo_egress))
        .route("/ipinfo/{ip}/json", get(ipinfo_ip))
        .with_state(state)
}

pub struct FakeUpstream {
    pub base_url: String,
    pub state: Shared,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl FakeUpstream {
    pub async fn spawn() -> Self {
        let state: Shared = Arc::new(FakeUpstreamState::default());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let app = make_fake_upstream_app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Fake upstream failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn ticketmaster_url(&self) -> String {
        format!("{}/discovery/v2", self.base_url)
    }

    pub fn spotify_accounts_url(&self) -> String {
        format!("{}/spotify-accounts", self.base_url)
    }

    pub fn spotify_api_url(&self) -> String {
        format!("{}/spotify/v1", self.base_url)
    }

    pub fn ipinfo_url(&self) -> String {
        format!("{}/ipinfo", self.base_url)
    }

    pub fn counters(&self) -> &UpstreamCounters {
        &self.state.counters
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
