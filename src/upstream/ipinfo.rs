use super::{fetch_json, trim_base_url, UpstreamError};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpLocation {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Deserialize)]
struct IpInfoResponse {
    loc: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
}

/// Splits an ipinfo `"lat,lon"` pair.
fn parse_loc(loc: &str) -> Result<(f64, f64), UpstreamError> {
    let invalid = || UpstreamError::InvalidResponse(format!("malformed loc '{}'", loc));
    let (lat, lon) = loc.split_once(',').ok_or_else(invalid)?;
    let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
    let lon = lon.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok((lat, lon))
}

/// Whether `ip` is routable on the public internet, i.e. worth geolocating.
pub fn is_public_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation())
        }
        IpAddr::V6(v6) => {
            let first = v6.segments()[0];
            let unique_local = first & 0xfe00 == 0xfc00;
            let link_local = first & 0xffc0 == 0xfe80;
            match v6.to_ipv4_mapped() {
                Some(v4) => is_public_ip(&IpAddr::V4(v4)),
                None => !(v6.is_loopback() || v6.is_unspecified() || unique_local || link_local),
            }
        }
    }
}

pub struct IpInfoClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl IpInfoClient {
    pub fn new(client: reqwest::Client, base_url: &str, token: String) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url),
            token,
        }
    }

    /// Geolocates `ip`, or the caller's own egress address when `None`.
    pub async fn lookup(&self, ip: Option<IpAddr>) -> Result<IpLocation, UpstreamError> {
        let url = match ip {
            Some(ip) => format!("{}/{}/json", self.base_url, ip),
            None => format!("{}/json", self.base_url),
        };
        let response: IpInfoResponse = fetch_json(
            self.client
                .get(&url)
                .query(&[("token", self.token.as_str())]),
        )
        .await?;

        let loc = response.loc.ok_or_else(|| {
            UpstreamError::InvalidResponse("loc not found from ipinfo".to_string())
        })?;
        let (lat, lon) = parse_loc(&loc)?;

        Ok(IpLocation {
            lat,
            lon,
            city: response.city,
            region: response.region,
            country: response.country,
        })
    }
}
