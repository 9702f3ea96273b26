use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::Coordinate;

use super::{LocalTimeSource, endpoint, get_json};

pub const DEFAULT_BASE_URL: &str = "https://api.ipgeolocation.io";

/// Local civil time via the ipgeolocation.io timezone API.
#[derive(Debug, Clone)]
pub struct IpGeolocationClock {
    api_key: String,
    base_url: String,
    http: Client,
}

impl IpGeolocationClock {
    pub fn new(api_key: String, base_url: String, http: Client) -> Self {
        Self { api_key, base_url, http }
    }
}

#[derive(Debug, Deserialize)]
struct IpgTimezone {
    date_time_txt: Option<String>,
}

#[async_trait]
impl LocalTimeSource for IpGeolocationClock {
    async fn local_time(&self, coordinate: Coordinate) -> Result<String> {
        let url = endpoint(&self.base_url, "/timezone");

        let parsed: IpgTimezone = get_json(
            &self.http,
            &url,
            &[
                ("apiKey", self.api_key.clone()),
                ("lat", coordinate.latitude.to_string()),
                ("long", coordinate.longitude.to_string()),
            ],
            "ipgeolocation",
        )
        .await?;

        parsed
            .date_time_txt
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow!("ipgeolocation response contained no local time"))
    }
}
