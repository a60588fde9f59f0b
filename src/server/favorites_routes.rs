use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::error::ApiError;
use super::state::{GuardedFavoritesStore, ServerState};
use crate::favorites::{FavoriteDocument, FavoritesError};

async fn list_favorites(
    State(store): State<GuardedFavoritesStore>,
) -> Result<impl IntoResponse, ApiError> {
    let favorites = store
        .list()
        .map_err(|e| ApiError::favorites("Failed to fetch favorites", e))?;
    debug!("Listing {} favorites", favorites.len());
    Ok(Json(favorites))
}

async fn add_favorite(
    State(store): State<GuardedFavoritesStore>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!("Rejected favorite body: {}", rejection.body_text());
            return Err(ApiError::favorites(
                "Failed to add favorite",
                FavoritesError::MissingId,
            ));
        }
    };

    let document = FavoriteDocument::from_body(body)
        .map_err(|e| ApiError::favorites("Failed to add favorite", e))?;
    let id = document.id.clone();
    let outcome = store
        .upsert(document)
        .map_err(|e| ApiError::favorites("Failed to add favorite", e))?;
    info!("Favorite {} {}", id, outcome.as_str());

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Added to favorites" })),
    ))
}

async fn remove_favorite(
    State(store): State<GuardedFavoritesStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    store
        .delete(&id)
        .map_err(|e| ApiError::favorites("Failed to remove favorite", e))?;
    info!("Favorite {} removed", id);
    Ok(Json(json!({ "message": "Removed from favorites" })))
}

pub fn make_favorites_routes(state: ServerState) -> Router {
    Router::new()
        .route("/", get(list_favorites).post(add_favorite))
        .route("/{id}", delete(remove_favorite))
        .with_state(state)
}
