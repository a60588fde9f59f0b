use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::error::ApiError;
use super::state::{GuardedTicketmaster, ServerState};
use crate::events::{DistanceUnit, EventSearch, SearchLocation, Segment, DEFAULT_RADIUS};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub keyword: Option<String>,
    pub segment_id: Option<String>,
    pub category: Option<String>,
    pub radius: Option<u32>,
    pub unit: Option<DistanceUnit>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl EventsQuery {
    /// A raw `segmentId` wins over a `category` label; `lat`/`lon` win over `city`.
    pub fn into_search(self) -> EventSearch {
        let segment_id = non_blank(&self.segment_id).or_else(|| {
            self.category
                .as_deref()
                .and_then(Segment::from_label)
                .map(|s| s.id().to_string())
        });

        let location = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(SearchLocation::LatLon { lat, lon }),
            _ => non_blank(&self.city).map(SearchLocation::City),
        };

        EventSearch {
            keyword: non_blank(&self.keyword),
            segment_id,
            radius: self.radius.unwrap_or(DEFAULT_RADIUS),
            unit: self.unit.unwrap_or_default(),
            location,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SuggestQuery {
    keyword: Option<String>,
}

async fn search_events(
    State(ticketmaster): State<GuardedTicketmaster>,
    query: Result<Query<EventsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let events = ticketmaster
        .search_events(&query.into_search())
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch events from Ticketmaster", e, true))?;
    Ok(Json(events))
}

async fn suggest(
    State(ticketmaster): State<GuardedTicketmaster>,
    Query(query): Query<SuggestQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let keyword = query.keyword.unwrap_or_default();
    let suggestions = ticketmaster
        .suggest(&keyword)
        .await
        .map_err(|e| ApiError::upstream("Failed to get suggestions", e, true))?;
    Ok(Json(suggestions))
}

async fn event_details(
    State(ticketmaster): State<GuardedTicketmaster>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let details = ticketmaster
        .event_details(&id)
        .await
        .map_err(|e| {
            ApiError::upstream("Failed to fetch event details from Ticketmaster", e, true)
        })?;
    Ok(Json(details))
}

pub fn make_events_routes(state: ServerState) -> Router {
    Router::new()
        .route("/events", get(search_events))
        .route("/suggest", get(suggest))
        .route("/event/{id}", get(event_details))
        .with_state(state)
}
