use crate::events::{DistanceUnit, EventSummary, Segment, DEFAULT_RADIUS};

use super::api::SearchParams;

/// State of the search form, as the user filled it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    pub keyword: String,
    /// Form label, `all` for no filter.
    pub category: String,
    pub distance: Option<u32>,
    pub city: String,
    pub auto_detect: bool,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            category: "all".to_string(),
            distance: Some(DEFAULT_RADIUS),
            city: String::new(),
            auto_detect: false,
            lat: None,
            lon: None,
        }
    }
}

impl SearchForm {
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }

    /// Query parameters for `GET /api/events`.
    pub fn to_params(&self) -> SearchParams {
        let mut params = SearchParams::new();

        let keyword = self.keyword.trim();
        if !keyword.is_empty() {
            params.push(("keyword", keyword.to_string()));
        }
        if let Some(segment) = Segment::from_label(&self.category) {
            params.push(("segmentId", segment.id().to_string()));
        }

        let radius = self.distance.filter(|d| *d > 0).unwrap_or(DEFAULT_RADIUS);
        params.push(("radius", radius.to_string()));
        params.push(("unit", DistanceUnit::Miles.as_str().to_string()));

        match (self.auto_detect, self.lat, self.lon) {
            (true, Some(lat), Some(lon)) => {
                params.push(("lat", lat.to_string()));
                params.push(("lon", lon.to_string()));
            }
            _ => {
                let city = self.city.trim();
                if !city.is_empty() {
                    params.push(("city", city.to_string()));
                }
            }
        }
        params
    }

    /// The form as submitted: trimmed, and with the location source settled.
    pub fn normalized(&self) -> SearchForm {
        SearchForm {
            keyword: self.keyword.trim().to_string(),
            city: if self.auto_detect {
                String::new()
            } else {
                self.city.trim().to_string()
            },
            lat: self.lat.filter(|_| self.auto_detect),
            lon: self.lon.filter(|_| self.auto_detect),
            ..self.clone()
        }
    }
}

/// One of the five display labels, or `None` for anything else.
pub fn category_label(raw: &str) -> Option<&'static str> {
    Segment::classify(raw).map(|s| s.display_name())
}

/// "date, time", skipping whichever is missing.
pub fn date_time_label(event: &EventSummary) -> Option<String> {
    let parts: Vec<&str> = [event.date.trim(), event.time.trim()]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// The most recent search and its results.
#[derive(Debug, Default)]
pub struct SearchSession {
    last: Option<(SearchForm, Vec<EventSummary>)>,
}

impl SearchSession {
    pub fn record(&mut self, form: SearchForm, results: Vec<EventSummary>) {
        self.last = Some((form, results));
    }

    pub fn restore(&self) -> Option<(&SearchForm, &[EventSummary])> {
        self.last
            .as_ref()
            .map(|(form, results)| (form, results.as_slice()))
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
