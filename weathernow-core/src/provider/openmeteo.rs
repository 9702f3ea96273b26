use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Coordinate, CurrentConditions, DailySeries, HourlySeries, RawForecast};

use super::{ForecastSource, endpoint, get_json};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode";
const HOURLY_FIELDS: &str = "temperature_2m,weathercode";
const HOURLY_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    base_url: String,
    http: Client,
}

impl OpenMeteoForecast {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
}

// Value arrays may contain nulls where the model has no data for a slot.
#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    weathercode: Vec<Option<i32>>,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    weathercode: Vec<Option<i32>>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current_weather: OmCurrentWeather,
    daily: OmDaily,
    hourly: OmHourly,
}

impl TryFrom<OmResponse> for RawForecast {
    type Error = anyhow::Error;

    fn try_from(res: OmResponse) -> Result<Self> {
        let dates = res
            .daily
            .time
            .iter()
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .with_context(|| format!("Invalid daily date '{d}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        let timestamps = res
            .hourly
            .time
            .iter()
            .map(|t| {
                NaiveDateTime::parse_from_str(t, HOURLY_FORMAT)
                    .with_context(|| format!("Invalid hourly timestamp '{t}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RawForecast {
            current: CurrentConditions {
                temperature_c: res.current_weather.temperature,
                wind_speed_kmh: res.current_weather.windspeed,
                weather_code: res.current_weather.weathercode,
            },
            daily: DailySeries {
                dates,
                temperature_max_c: res.daily.temperature_2m_max,
                temperature_min_c: res.daily.temperature_2m_min,
                weather_codes: res.daily.weathercode,
            },
            hourly: HourlySeries {
                timestamps,
                temperature_c: res.hourly.temperature_2m,
                weather_codes: res.hourly.weathercode,
            },
        })
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoForecast {
    async fn forecast(&self, coordinate: Coordinate) -> Result<RawForecast> {
        let url = endpoint(&self.base_url, "/v1/forecast");

        let parsed: OmResponse = get_json(
            &self.http,
            &url,
            &[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ],
            "Open-Meteo forecast",
        )
        .await?;

        RawForecast::try_from(parsed)
    }
}
