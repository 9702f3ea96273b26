use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Coordinate, LocationResult};

use super::{Geocoder, endpoint, get_json};

pub const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com";

#[derive(Debug, Clone)]
pub struct OpenCageGeocoder {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenCageGeocoder {
    pub fn new(api_key: String, base_url: String, http: Client) -> Self {
        Self { api_key, base_url, http }
    }
}

#[derive(Debug, Deserialize)]
struct OcGeometry {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct OcResult {
    formatted: String,
    geometry: OcGeometry,
}

#[derive(Debug, Deserialize)]
struct OcResponse {
    #[serde(default)]
    results: Vec<OcResult>,
}

#[async_trait]
impl Geocoder for OpenCageGeocoder {
    async fn geocode(&self, query: &str) -> Result<Vec<LocationResult>> {
        let url = endpoint(&self.base_url, "/geocode/v1/json");

        let parsed: OcResponse = get_json(
            &self.http,
            &url,
            &[("q", query.to_string()), ("key", self.api_key.clone())],
            "OpenCage",
        )
        .await?;

        Ok(parsed
            .results
            .into_iter()
            .map(|r| LocationResult {
                coordinate: Coordinate::new(r.geometry.lat, r.geometry.lng),
                display_name: r.formatted,
            })
            .collect())
    }
}
