use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::Coordinate;

use super::{AirQualitySource, endpoint, get_json};

pub const DEFAULT_BASE_URL: &str = "https://air-quality-api.open-meteo.com";

/// US AQI from the Open-Meteo air-quality API.
#[derive(Debug, Clone)]
pub struct OpenMeteoAirQuality {
    base_url: String,
    http: Client,
}

impl OpenMeteoAirQuality {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[derive(Debug, Deserialize)]
struct AqCurrent {
    us_aqi: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AqResponse {
    current: AqCurrent,
}

#[async_trait]
impl AirQualitySource for OpenMeteoAirQuality {
    async fn air_quality_index(&self, coordinate: Coordinate) -> Result<i32> {
        let url = endpoint(&self.base_url, "/v1/air-quality");

        let parsed: AqResponse = get_json(
            &self.http,
            &url,
            &[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("current", "us_aqi".to_string()),
            ],
            "Open-Meteo air quality",
        )
        .await?;

        let aqi = parsed
            .current
            .us_aqi
            .filter(|v| v.is_finite())
            .ok_or_else(|| anyhow!("air quality response contained no US AQI"))?;

        Ok(aqi.round() as i32)
    }
}
