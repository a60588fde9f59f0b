use anyhow::{Context, Result};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::{error, info};

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, MethodRouter},
    Json, Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;

use super::error::ApiError;
use super::events_routes::make_events_routes;
use super::favorites_routes::make_favorites_routes;
use super::location_routes::make_location_routes;
use super::spotify_routes::make_spotify_routes;
use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    };
    Json(stats)
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

/// Client-side routes get the app shell; anything that looks like a file does not.
async fn spa_fallback(State(index_path): State<Arc<PathBuf>>, uri: Uri) -> Response {
    let looks_like_file = uri
        .path()
        .rsplit('/')
        .next()
        .is_some_and(|segment| segment.contains('.'));
    if looks_like_file {
        return StatusCode::NOT_FOUND.into_response();
    }

    match tokio::fs::read_to_string(index_path.as_path()).await {
        Ok(index) => Html(index).into_response(),
        Err(e) => {
            error!("Failed to read {:?}: {}", index_path, e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        favorites_store: GuardedFavoritesStore,
        ticketmaster: GuardedTicketmaster,
        spotify: GuardedSpotify,
        ipinfo: GuardedIpInfo,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            favorites_store,
            ticketmaster,
            spotify,
            ipinfo,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

fn make_frontend_router(frontend_path: &str) -> Router {
    let index_path = Arc::new(Path::new(frontend_path).join("index.html"));
    let spa: MethodRouter = get(spa_fallback).with_state(index_path);
    let static_files_service = ServeDir::new(frontend_path)
        .append_index_html_on_directories(true)
        .fallback(spa);
    Router::new().fallback_service(static_files_service)
}

pub fn make_app(state: ServerState) -> Router {
    let api_routes: Router = Router::new()
        .nest("/favorites", make_favorites_routes(state.clone()))
        .nest("/spotify", make_spotify_routes(state.clone()))
        .merge(make_events_routes(state.clone()))
        .merge(make_location_routes(state.clone()))
        .fallback(api_not_found);

    let home_router: Router = match &state.config.frontend_dir_path {
        Some(frontend_path) => make_frontend_router(frontend_path),
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    home_router
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

pub async fn run_server(state: ServerState) -> Result<()> {
    let port = state.config.port;
    let app = make_app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}
