use axum::{
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::net::IpAddr;
use tracing::debug;

use super::error::ApiError;
use super::state::{GuardedIpInfo, ServerState};
use crate::upstream::ipinfo::is_public_ip;

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// First `X-Forwarded-For` hop, when it is a public address.
fn forwarded_client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get(FORWARDED_FOR_HEADER)?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse::<IpAddr>()
        .ok()
        .filter(is_public_ip)
}

async fn ip_location(
    State(ipinfo): State<GuardedIpInfo>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let client_ip = forwarded_client_ip(&headers);
    debug!("Geolocating {:?}", client_ip);
    let location = ipinfo
        .lookup(client_ip)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch IP location", e, false))?;
    Ok(Json(location))
}

pub fn make_location_routes(state: ServerState) -> Router {
    Router::new()
        .route("/ip-location", get(ip_location))
        .with_state(state)
}
