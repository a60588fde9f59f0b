//! Response shapes of the Ticketmaster Discovery API.
//!
//! Every field is optional: the catalog omits whatever it does not know, and
//! occasionally sends `null` for lists.

use crate::events::EventSummary;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmNamed {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmImage {
    pub url: Option<String>,
    pub width: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmStart {
    pub local_date: Option<String>,
    pub local_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmStatus {
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmDates {
    pub start: Option<TmStart>,
    pub status: Option<TmStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmClassification {
    pub segment: Option<TmNamed>,
    pub genre: Option<TmNamed>,
    pub sub_genre: Option<TmNamed>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmSeatmap {
    pub static_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmState {
    pub name: Option<String>,
    pub state_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmAddress {
    pub line1: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmVenue {
    pub name: Option<String>,
    pub url: Option<String>,
    pub city: Option<TmNamed>,
    pub state: Option<TmState>,
    pub country: Option<TmNamed>,
    pub address: Option<TmAddress>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<TmImage>,
    pub parking_detail: Option<String>,
    /// Either a plain string or an object with `generalRule`/`childRule`.
    pub general_info: Option<Value>,
    pub general_rule: Option<String>,
    pub child_rule: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmEventEmbedded {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub venues: Vec<TmVenue>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attractions: Vec<TmNamed>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<TmImage>,
    pub dates: Option<TmDates>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub classifications: Vec<TmClassification>,
    pub seatmap: Option<TmSeatmap>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<TmEventEmbedded>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TmSearchEmbedded {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub events: Vec<TmEvent>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TmSearchResponse {
    #[serde(rename = "_embedded")]
    pub embedded: Option<TmSearchEmbedded>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TmSuggestEmbedded {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attractions: Vec<TmNamed>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub events: Vec<TmNamed>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub venues: Vec<TmNamed>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TmSuggestResponse {
    #[serde(rename = "_embedded")]
    pub embedded: Option<TmSuggestEmbedded>,
}

/// The widest image; among equally wide ones the first wins. Missing widths
/// count as zero.
pub fn pick_cover_image(images: &[TmImage]) -> Option<&TmImage> {
    images.iter().fold(None, |best: Option<&TmImage>, image| match best {
        Some(b) if image.width.unwrap_or(0.0) > b.width.unwrap_or(0.0) => Some(image),
        Some(b) => Some(b),
        None => Some(image),
    })
}

impl TmEvent {
    pub fn first_venue(&self) -> Option<&TmVenue> {
        self.embedded.as_ref().and_then(|e| e.venues.first())
    }

    pub fn attractions(&self) -> &[TmNamed] {
        self.embedded
            .as_ref()
            .map(|e| e.attractions.as_slice())
            .unwrap_or_default()
    }

    pub fn first_classification(&self) -> Option<&TmClassification> {
        self.classifications.first()
    }

    pub fn segment_name(&self) -> Option<&str> {
        self.first_classification()
            .and_then(|c| c.segment.as_ref())
            .and_then(|s| s.name.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn start(&self) -> Option<&TmStart> {
        self.dates.as_ref().and_then(|d| d.start.as_ref())
    }

    pub fn status_code(&self) -> Option<&str> {
        self.dates
            .as_ref()
            .and_then(|d| d.status.as_ref())
            .and_then(|s| s.code.as_deref())
    }

    pub fn to_summary(&self) -> EventSummary {
        let venue = self.first_venue();
        let venue_name = |f: fn(&TmVenue) -> Option<&str>| {
            venue.and_then(f).unwrap_or_default().to_string()
        };
        let category = self.segment_name().unwrap_or_default().to_string();

        EventSummary {
            id: self.id.clone().unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            date: self
                .start()
                .and_then(|s| s.local_date.clone())
                .unwrap_or_default(),
            time: self
                .start()
                .and_then(|s| s.local_time.clone())
                .unwrap_or_default(),
            genre: category.clone(),
            category,
            venue: venue_name(|v| v.name.as_deref()),
            city: venue_name(|v| v.city.as_ref().and_then(|c| c.name.as_deref())),
            state: venue_name(|v| v.state.as_ref().and_then(|s| s.name.as_deref())),
            country: venue_name(|v| v.country.as_ref().and_then(|c| c.name.as_deref())),
            image_url: pick_cover_image(&self.images)
                .and_then(|i| i.url.clone())
                .unwrap_or_default(),
            url: self.url.clone().unwrap_or_default(),
        }
    }
}
