//! Client-side mapping of the raw upstream event payload.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::events::{EventSummary, TicketStatus};
use crate::upstream::ticketmaster::{pick_cover_image, TmEvent, TmVenue};

const NOT_AVAILABLE: &str = "N/A";
const UNDEFINED_SUB_GENRE: &str = "Undefined";
const DEFAULT_SHARE_TEXT: &str = "Check out this event";

lazy_static! {
    static ref SEATMAP_IMAGE_REGEX: Regex = Regex::new(r"(?i)seat|map|chart").unwrap();
}

fn or_not_available(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareLinks {
    pub facebook: String,
    pub twitter: String,
}

/// Venue tab content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueSection {
    pub address_line: String,
    pub google_maps_url: Option<String>,
    pub see_events_url: Option<String>,
    pub image_url: Option<String>,
    pub parking: String,
    pub general_rule: String,
    pub child_rule: String,
}

impl VenueSection {
    fn from_venue(venue: &TmVenue) -> Self {
        let line1 = venue.address.as_ref().and_then(|a| a.line1.as_deref());
        let city = venue.city.as_ref().and_then(|c| c.name.as_deref());
        let state = venue.state.as_ref().and_then(|s| {
            s.state_code
                .as_deref()
                .filter(|c| !c.is_empty())
                .or(s.name.as_deref())
        });
        let address_line = [line1, city, state]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let google_maps_url = (!address_line.is_empty()).then(|| {
            format!(
                "https://www.google.com/maps/search/?api=1&query={}",
                urlencoding::encode(&address_line)
            )
        });

        // A string `generalInfo` is the general rule itself and carries no child rule.
        let (info_general, info_child) = match &venue.general_info {
            Some(Value::String(s)) => (Some(s.as_str()), None),
            Some(info) => (
                info.get("generalRule").and_then(Value::as_str),
                info.get("childRule").and_then(Value::as_str),
            ),
            None => (None, None),
        };
        let general_rule = non_empty(info_general)
            .or_else(|| non_empty(venue.general_rule.as_deref()))
            .unwrap_or_default();
        let child_rule = non_empty(info_child)
            .or_else(|| non_empty(venue.child_rule.as_deref()))
            .unwrap_or_default();

        Self {
            address_line,
            google_maps_url,
            see_events_url: non_empty(venue.url.as_deref()),
            image_url: venue.images.first().and_then(|i| non_empty(i.url.as_deref())),
            parking: venue.parking_detail.clone().unwrap_or_default(),
            general_rule,
            child_rule,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventDetail {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: String,
    pub artist_team: String,
    pub venue: String,
    pub genres: String,
    pub category: String,
    pub ticket_status: TicketStatus,
    pub buy_ticket_url: String,
    pub share_url: String,
    pub seatmap_url: Option<String>,
    pub image_url: String,
    pub venue_section: VenueSection,
}

impl EventDetail {
    pub fn from_upstream(payload: Value) -> Result<Self> {
        let event: TmEvent =
            serde_json::from_value(payload).context("Malformed event details payload")?;
        Ok(Self::from_event(&event))
    }

    fn from_event(event: &TmEvent) -> Self {
        let venue = event.first_venue();

        let artist_team = event
            .attractions()
            .iter()
            .filter_map(|a| a.name.as_deref())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let genres = event
            .first_classification()
            .map(|c| {
                let sub_genre = c
                    .sub_genre
                    .as_ref()
                    .and_then(|g| g.name.as_deref())
                    .filter(|n| *n != UNDEFINED_SUB_GENRE);
                [
                    c.segment.as_ref().and_then(|s| s.name.as_deref()),
                    c.genre.as_ref().and_then(|g| g.name.as_deref()),
                    sub_genre,
                ]
                .into_iter()
                .flatten()
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
            })
            .unwrap_or_default();

        let seatmap_url = event
            .seatmap
            .as_ref()
            .and_then(|s| non_empty(s.static_url.as_deref()))
            .or_else(|| {
                venue?
                    .images
                    .iter()
                    .filter_map(|i| i.url.as_deref())
                    .find(|url| SEATMAP_IMAGE_REGEX.is_match(url))
                    .map(str::to_string)
            });

        let url = event.url.clone().unwrap_or_default();

        Self {
            id: event.id.clone().unwrap_or_default(),
            name: or_not_available(event.name.as_deref()),
            date: or_not_available(event.start().and_then(|s| s.local_date.as_deref())),
            time: event
                .start()
                .and_then(|s| s.local_time.clone())
                .unwrap_or_default(),
            artist_team: or_not_available(Some(artist_team.as_str())),
            venue: or_not_available(venue.and_then(|v| v.name.as_deref())),
            genres: or_not_available(Some(genres.as_str())),
            category: or_not_available(event.segment_name()),
            ticket_status: TicketStatus::from_code(event.status_code()),
            buy_ticket_url: url.clone(),
            share_url: url,
            seatmap_url,
            image_url: pick_cover_image(&event.images)
                .and_then(|i| i.url.clone())
                .unwrap_or_default(),
            venue_section: venue.map(VenueSection::from_venue).unwrap_or_default(),
        }
    }

    pub fn is_music(&self) -> bool {
        self.category.eq_ignore_ascii_case("music")
    }

    /// Facebook and Twitter share links, when there is a URL to share.
    pub fn share_links(&self) -> Option<ShareLinks> {
        let url = [self.share_url.as_str(), self.buy_ticket_url.as_str()]
            .into_iter()
            .find(|u| !u.is_empty())?;
        let text = if self.name.is_empty() {
            DEFAULT_SHARE_TEXT
        } else {
            self.name.as_str()
        };
        let encoded_url = urlencoding::encode(url);
        Some(ShareLinks {
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={}", encoded_url),
            twitter: format!(
                "https://twitter.com/intent/tweet?url={}&text={}",
                encoded_url,
                urlencoding::encode(text)
            ),
        })
    }

    /// The favorite record saved from the detail page.
    pub fn to_summary(&self) -> EventSummary {
        EventSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            genre: self.genres.clone(),
            venue: self.venue.clone(),
            image_url: self.image_url.clone(),
            url: self.buy_ticket_url.clone(),
            ..Default::default()
        }
    }
}
