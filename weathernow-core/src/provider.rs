use crate::{
    Config,
    model::{Coordinate, LocationResult, RawForecast},
    provider::{
        airquality::OpenMeteoAirQuality, ipgeolocation::IpGeolocationClock,
        opencage::OpenCageGeocoder, openmeteo::OpenMeteoForecast,
    },
};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::{fmt::Debug, sync::Arc};

pub mod airquality;
pub mod ipgeolocation;
pub mod opencage;
pub mod openmeteo;

const USER_AGENT: &str = concat!("weather-now/", env!("CARGO_PKG_VERSION"));

/// Upstream services that need an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenCage,
    IpGeolocation,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenCage => "opencage",
            ProviderId::IpGeolocation => "ipgeolocation",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenCage, ProviderId::IpGeolocation]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "opencage" => Ok(ProviderId::OpenCage),
            "ipgeolocation" => Ok(ProviderId::IpGeolocation),
            _ => Err(anyhow!(
                "Unknown provider '{value}'. Supported providers: opencage, ipgeolocation."
            )),
        }
    }
}

/// Free-text place name to candidate locations, best match first.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, query: &str) -> Result<Vec<LocationResult>>;
}

#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn forecast(&self, coordinate: Coordinate) -> Result<RawForecast>;
}

/// Human-readable local date and time at a coordinate.
#[async_trait]
pub trait LocalTimeSource: Send + Sync + Debug {
    async fn local_time(&self, coordinate: Coordinate) -> Result<String>;
}

#[async_trait]
pub trait AirQualitySource: Send + Sync + Debug {
    async fn air_quality_index(&self, coordinate: Coordinate) -> Result<i32>;
}

/// The four collaborators a forecast run talks to.
#[derive(Debug, Clone)]
pub struct Providers {
    pub geocoder: Arc<dyn Geocoder>,
    pub forecast: Arc<dyn ForecastSource>,
    pub local_time: Arc<dyn LocalTimeSource>,
    pub air_quality: Arc<dyn AirQualitySource>,
}

impl Providers {
    /// Build the HTTP-backed providers from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = http_client(config)?;
        let endpoints = &config.endpoints;

        let geocoder = OpenCageGeocoder::new(
            config.require_api_key(ProviderId::OpenCage)?.to_owned(),
            endpoints.geocoding.clone(),
            http.clone(),
        );
        let local_time = IpGeolocationClock::new(
            config.require_api_key(ProviderId::IpGeolocation)?.to_owned(),
            endpoints.local_time.clone(),
            http.clone(),
        );
        let forecast = OpenMeteoForecast::new(endpoints.forecast.clone(), http.clone());
        let air_quality = OpenMeteoAirQuality::new(endpoints.air_quality.clone(), http);

        Ok(Self {
            geocoder: Arc::new(geocoder),
            forecast: Arc::new(forecast),
            local_time: Arc::new(local_time),
            air_quality: Arc::new(air_quality),
        })
    }
}

fn http_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to build HTTP client")
}

/// GET `url` and decode the JSON body, turning non-success statuses into errors.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, String)],
    service: &str,
) -> Result<T> {
    tracing::debug!(%url, service, "sending request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .with_context(|| format!("Failed to send request to {service}"))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read {service} response body"))?;

    if !status.is_success() {
        return Err(anyhow!(
            "{service} request failed with status {}: {}",
            status,
            truncate_body(&body),
        ));
    }

    serde_json::from_str(&body).with_context(|| format!("Failed to parse {service} JSON"))
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
