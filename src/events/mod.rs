//! Event shapes shared by the gateway and the client.

mod segment;
mod status;

pub use segment::Segment;
pub use status::TicketStatus;

use serde::{Deserialize, Serialize};

pub const DEFAULT_RADIUS: u32 = 10;

/// A search result, as returned by `GET /api/events` and stored as a favorite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventSummary {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: String,
    pub genre: String,
    pub category: String,
    pub venue: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub image_url: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Miles,
    Km,
}

impl DistanceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Miles => "miles",
            DistanceUnit::Km => "km",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchLocation {
    LatLon { lat: f64, lon: f64 },
    City(String),
}

/// Normalized input of an event search.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSearch {
    pub keyword: Option<String>,
    pub segment_id: Option<String>,
    pub radius: u32,
    pub unit: DistanceUnit,
    pub location: Option<SearchLocation>,
}

impl Default for EventSearch {
    fn default() -> Self {
        Self {
            keyword: None,
            segment_id: None,
            radius: DEFAULT_RADIUS,
            unit: DistanceUnit::default(),
            location: None,
        }
    }
}
