use super::models::{TmSearchResponse, TmSuggestResponse};
use crate::events::{EventSearch, EventSummary, SearchLocation};
use crate::upstream::{fetch_json, trim_base_url, UpstreamError};
use serde_json::Value;
use tracing::debug;

const SEARCH_PAGE_SIZE: u32 = 20;
const SEARCH_SORT: &str = "date,asc";
const SUGGEST_SIZE: u32 = 5;
const MAX_SUGGESTIONS: usize = 10;

/// Client for the Ticketmaster Discovery v2 API.
pub struct TicketmasterClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TicketmasterClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url),
            api_key,
        }
    }

    pub async fn search_events(
        &self,
        search: &EventSearch,
    ) -> Result<Vec<EventSummary>, UpstreamError> {
        let url = format!("{}/events.json", self.base_url);
        let mut params: Vec<(&str, String)> = vec![
            ("apikey", self.api_key.clone()),
            ("size", SEARCH_PAGE_SIZE.to_string()),
            ("sort", SEARCH_SORT.to_string()),
            ("radius", search.radius.to_string()),
            ("unit", search.unit.as_str().to_string()),
        ];
        if let Some(keyword) = &search.keyword {
            params.push(("keyword", keyword.clone()));
        }
        if let Some(segment_id) = &search.segment_id {
            params.push(("segmentId", segment_id.clone()));
        }
        match &search.location {
            Some(SearchLocation::LatLon { lat, lon }) => {
                params.push(("latlong", format!("{},{}", lat, lon)));
            }
            Some(SearchLocation::City(city)) => params.push(("city", city.clone())),
            None => {}
        }

        let response: TmSearchResponse = fetch_json(self.client.get(&url).query(&params)).await?;
        let events: Vec<EventSummary> = response
            .embedded
            .map(|e| e.events)
            .unwrap_or_default()
            .iter()
            .map(|e| e.to_summary())
            .collect();
        debug!("Ticketmaster search returned {} events", events.len());
        Ok(events)
    }

    /// Distinct names of performers, then events, then venues matching
    /// `keyword`. A blank keyword never reaches the upstream.
    pub async fn suggest(&self, keyword: &str) -> Result<Vec<String>, UpstreamError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(vec![]);
        }

        let url = format!("{}/suggest.json", self.base_url);
        let size = SUGGEST_SIZE.to_string();
        let request = self.client.get(&url).query(&[
            ("apikey", self.api_key.as_str()),
            ("keyword", keyword),
            ("size", size.as_str()),
        ]);
        let response: TmSuggestResponse = fetch_json(request).await?;

        let mut suggestions: Vec<String> = Vec::new();
        if let Some(embedded) = response.embedded {
            let names = embedded
                .attractions
                .into_iter()
                .chain(embedded.events)
                .chain(embedded.venues)
                .filter_map(|n| n.name)
                .filter(|n| !n.is_empty());
            for name in names {
                if !suggestions.contains(&name) {
                    suggestions.push(name);
                }
            }
        }
        suggestions.truncate(MAX_SUGGESTIONS);
        Ok(suggestions)
    }

    /// The raw upstream event document.
    pub async fn event_details(&self, id: &str) -> Result<Value, UpstreamError> {
        let url = format!(
            "{}/events/{}.json",
            self.base_url,
            urlencoding::encode(id)
        );
        fetch_json(
            self.client
                .get(&url)
                .query(&[("apikey", self.api_key.as_str())]),
        )
        .await
    }
}
