//! Canned upstream payloads and on-disk test resources

use super::constants::*;
use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

pub const FRONTEND_INDEX_HTML: &str = "<!doctype html><app-root></app-root>";
pub const FRONTEND_MAIN_JS: &str = "console.log('events');";

fn event_1() -> Value {
    json!({
        "id": EVENT_1_ID,
        "name": "Taylor Swift | The Eras Tour",
        "url": "https://www.ticketmaster.com/event/vvG1zZ9KbHcXyz",
        "images": [
            {"url": "https://img.example.com/eras_640.jpg", "width": 640, "height": 360},
            {"url": "https://img.example.com/eras_2048.jpg", "width": 2048, "height": 1152},
            {"url": "https://img.example.com/eras_2048_b.jpg", "width": 2048, "height": 1152}
        ],
        "dates": {
            "start": {"localDate": "2025-08-01", "localTime": "19:00:00"},
            "status": {"code": "onsale"}
        },
        "classifications": [{
            "segment": {"id": "KZFzniwnSyZfZ7v7nJ", "name": "Music"},
            "genre": {"name": "Pop"},
            "subGenre": {"name": "Undefined"}
        }],
        "_embedded": {
            "venues": [{
                "name": "SoFi Stadium",
                "url": "https://www.ticketmaster.com/sofi-stadium-tickets/venue/123",
                "city": {"name": "Inglewood"},
                "state": {"name": "California", "stateCode": "CA"},
                "country": {"name": "United States Of America"},
                "address": {"line1": "1001 Stadium Dr"},
                "images": [{"url": "https://img.example.com/sofi_seatmap.png"}],
                "parkingDetail": "Parking lots open 4 hours before the show",
                "generalInfo": {
                    "generalRule": "No outside food or drinks",
                    "childRule": "Children 2 and older need a ticket"
                }
            }],
            "attractions": [{"name": ARTIST_NAME}]
        }
    })
}

fn event_2() -> Value {
    json!({
        "id": EVENT_2_ID,
        "name": "Lakers vs Celtics",
        "url": "https://www.ticketmaster.com/event/G5vYZ9Lakers01",
        "images": null,
        "dates": {
            "start": {"localDate": "2025-09-12"},
            "status": {"code": "rescheduled"}
        },
        "classifications": [{"segment": {"name": "Sports"}, "genre": {"name": "Basketball"}}],
        "_embedded": {
            "venues": [{"name": "Crypto.com Arena", "city": {"name": "Los Angeles"}}]
        }
    })
}

pub fn tm_search_response() -> Value {
    json!({
        "_embedded": {"events": [event_1(), event_2()]},
        "page": {"size": 20, "totalElements": 2, "totalPages": 1, "number": 0}
    })
}

/// What the catalog sends when nothing matches: no `_embedded` at all.
pub fn tm_empty_search_response() -> Value {
    json!({"page": {"size": 20, "totalElements": 0, "totalPages": 0, "number": 0}})
}

pub fn tm_suggest_response() -> Value {
    json!({
        "_embedded": {
            "attractions": [{"name": ARTIST_NAME}, {"name": "Taylor Swift Tribute"}],
            "events": [{"name": "Taylor Swift | The Eras Tour"}, {"name": ARTIST_NAME}],
            "venues": [{"name": "Taylor Hall"}]
        }
    })
}

/// Thirteen distinct names across the three categories, one repeated.
pub fn tm_suggest_many_response() -> Value {
    json!({
        "_embedded": {
            "attractions": [
                {"name": "Band 1"}, {"name": "Band 2"}, {"name": "Band 3"},
                {"name": "Band 4"}, {"name": "Band 5"}
            ],
            "events": [
                {"name": "Band Night 1"}, {"name": "Band 2"}, {"name": "Band Night 2"},
                {"name": "Band Night 3"}, {"name": "Band Night 4"}
            ],
            "venues": [{"name": "Band Hall 1"}, {"name": "Band Hall 2"}, {"name": "Band Hall 3"}]
        }
    })
}

pub fn tm_event_detail(id: &str) -> Option<Value> {
    match id {
        EVENT_1_ID => Some(event_1()),
        EVENT_2_ID => Some(event_2()),
        _ => None,
    }
}

pub fn spotify_artist_search(query: &str) -> Value {
    let items = if query == UNKNOWN_ARTIST {
        json!([])
    } else {
        json!([{
            "id": ARTIST_ID,
            "name": query,
            "followers": {"total": 95000000},
            "popularity": 100,
            "genres": ["pop"],
            "images": [{"url": "https://img.example.com/artist.jpg", "width": 640}],
            "external_urls": {"spotify": "https://open.spotify.com/artist/06HL4z0CvFAxyc27GXpf02"}
        }])
    };
    json!({"artists": {"items": items, "total": 1}})
}

pub fn spotify_albums() -> Value {
    json!({
        "items": [
            {
                "id": "album-1",
                "name": "The Tortured Poets Department",
                "release_date": "2024-04-19",
                "total_tracks": 16,
                "images": [{"url": "https://img.example.com/ttpd.jpg"}],
                "external_urls": {"spotify": "https://open.spotify.com/album/album-1"}
            },
            {
                "id": "album-2",
                "name": "Midnights",
                "release_date": "2022-10-21",
                "total_tracks": 13,
                "images": [],
                "external_urls": {}
            }
        ]
    })
}

pub fn ipinfo_response(ip: Option<&str>) -> Value {
    match ip {
        Some(ip) => json!({
            "ip": ip,
            "city": "Mountain View",
            "region": "California",
            "country": "US",
            "loc": "37.4056,-122.0775"
        }),
        None => json!({
            "ip": "203.0.113.7",
            "city": "Los Angeles",
            "region": "California",
            "country": "US",
            "loc": format!("{},{}", EGRESS_LAT, EGRESS_LON)
        }),
    }
}

/// A frontend build with an index page and one asset.
pub fn create_test_frontend() -> Result<TempDir> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("index.html"), FRONTEND_INDEX_HTML)?;
    fs::create_dir_all(dir.path().join("assets"))?;
    fs::write(dir.path().join("assets/main.js"), FRONTEND_MAIN_JS)?;
    Ok(dir)
}
