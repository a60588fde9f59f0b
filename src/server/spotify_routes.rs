use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::error::ApiError;
use super::state::{GuardedSpotify, ServerState};

#[derive(Debug, Deserialize)]
struct ArtistSearchQuery {
    q: Option<String>,
}

async fn search_artist(
    State(spotify): State<GuardedSpotify>,
    Query(query): Query<ArtistSearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let q = query.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(ApiError::BadRequest("Missing query q".to_string()));
    }

    let artist = spotify
        .search_artist(q)
        .await
        .map_err(|e| ApiError::upstream("Failed to search artist from Spotify", e, false))?;
    Ok(Json(artist))
}

async fn artist_albums(
    State(spotify): State<GuardedSpotify>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let albums = spotify
        .artist_albums(&id)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch artist albums from Spotify", e, false))?;
    Ok(Json(albums))
}

pub fn make_spotify_routes(state: ServerState) -> Router {
    Router::new()
        .route("/search-artist", get(search_artist))
        .route("/artist-albums/{id}", get(artist_albums))
        .with_state(state)
}
