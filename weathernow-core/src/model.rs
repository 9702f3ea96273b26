use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// First geocoder match for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub coordinate: Coordinate,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: i32,
}

/// Daily forecast as returned by the provider: parallel arrays, index `i` describing
/// the same day in each. The provider leaves a slot `None` when it has no value for
/// it; the day itself is kept so the arrays stay aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub temperature_max_c: Vec<Option<f64>>,
    pub temperature_min_c: Vec<Option<f64>>,
    pub weather_codes: Vec<Option<i32>>,
}

/// Hourly forecast as returned by the provider, in the destination's local time.
/// Index `i` is hour `i` counted from local midnight of the first day, so empty
/// slots stay in place as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    pub timestamps: Vec<NaiveDateTime>,
    pub temperature_c: Vec<Option<f64>>,
    pub weather_codes: Vec<Option<i32>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawForecast {
    pub current: CurrentConditions,
    pub daily: DailySeries,
    pub hourly: HourlySeries,
}

impl RawForecast {
    /// Rejects payloads whose parallel arrays disagree in length.
    pub fn validate(&self) -> Result<()> {
        let days = self.daily.dates.len();
        if self.daily.temperature_max_c.len() != days
            || self.daily.temperature_min_c.len() != days
            || self.daily.weather_codes.len() != days
        {
            bail!(
                "daily arrays have mismatched lengths (time={}, max={}, min={}, code={})",
                days,
                self.daily.temperature_max_c.len(),
                self.daily.temperature_min_c.len(),
                self.daily.weather_codes.len(),
            );
        }

        let hours = self.hourly.timestamps.len();
        if self.hourly.temperature_c.len() != hours || self.hourly.weather_codes.len() != hours {
            bail!(
                "hourly arrays have mismatched lengths (time={}, temperature={}, code={})",
                hours,
                self.hourly.temperature_c.len(),
                self.hourly.weather_codes.len(),
            );
        }

        Ok(())
    }
}

/// `None` temperatures or code mean the provider had no value for that day; the
/// emoji and description then fall back to the unknown-condition entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub temperature_max_c: Option<f64>,
    pub temperature_min_c: Option<f64>,
    pub weather_code: Option<i32>,
    pub emoji: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyForecastEntry {
    pub timestamp: NaiveDateTime,
    pub temperature_c: Option<f64>,
    pub weather_code: Option<i32>,
    pub emoji: &'static str,
    pub description: &'static str,
}

/// Best-effort extras. Either field may be absent without affecting the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryData {
    pub local_time: Option<String>,
    pub air_quality_index: Option<i32>,
}
