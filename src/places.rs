//! Client for the Google Places "nearby search" endpoint.

use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};

use crate::config::PlacesConfig;

pub const PLACES_NEARBY_URL: &str =
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const POPULAR_RATINGS_THRESHOLD: u64 = 100;

/// What the places service knows about the closest match.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlaceInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub is_popular: bool,
}

#[derive(Deserialize)]
struct NearbyResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<NearbyResult>,
}

#[derive(Deserialize, Default)]
struct NearbyResult {
    #[serde(default)]
    types: Vec<String>,
    name: Option<String>,
    vicinity: Option<String>,
    rating: Option<f64>,
    user_ratings_total: Option<u64>,
}

impl From<NearbyResult> for PlaceInfo {
    fn from(r: NearbyResult) -> Self {
        Self {
            kind: r
                .types
                .into_iter()
                .next()
                .unwrap_or_else(|| "unknown".to_string()),
            name: r.name.unwrap_or_else(|| "current location".to_string()),
            address: r.vicinity.unwrap_or_else(|| "unknown location".to_string()),
            rating: r.rating.unwrap_or(0.0),
            is_popular: r.user_ratings_total.unwrap_or(0) > POPULAR_RATINGS_THRESHOLD,
        }
    }
}

/// Turn a raw nearby search body into the best matching place.
pub fn parse_nearby_response(raw: &str) -> Result<PlaceInfo> {
    let resp: NearbyResponse = serde_json::from_str(raw)?;
    match resp.status.as_deref() {
        None | Some("OK") | Some("ZERO_RESULTS") => {}
        Some(status) => {
            let detail = resp.error_message.unwrap_or_default();
            return Err(anyhow!("Places API status {status}: {detail}"));
        }
    }
    let best = resp.results.into_iter().next().unwrap_or_default();
    Ok(best.into())
}

#[derive(Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    config: PlacesConfig,
}

impl PlacesClient {
    pub fn new(config: PlacesConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn nearby(&self, latitude: f64, longitude: f64) -> Result<PlaceInfo> {
        let url = self.config.url.as_deref().unwrap_or(PLACES_NEARBY_URL);
        info!(latitude, longitude, "fetching place details");

        let location = format!("{latitude},{longitude}");
        let radius = self.config.radius.to_string();
        let resp = self
            .http
            .get(url)
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            warn!(%status, "Places API request failed");
            return Err(anyhow!("Places API request failed with {status}"));
        }

        let raw = resp.text().await?;
        trace!(raw = %raw, "places response");
        let place = parse_nearby_response(&raw)?;
        debug!(name = %place.name, kind = %place.kind, "resolved place");
        Ok(place)
    }
}
