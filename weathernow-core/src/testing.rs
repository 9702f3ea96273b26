//! In-memory providers for exercising the pipeline without a network.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::sync::Notify;

use crate::{
    model::{Coordinate, CurrentConditions, DailySeries, HourlySeries, LocationResult, RawForecast},
    provider::{AirQualitySource, ForecastSource, Geocoder, LocalTimeSource, Providers},
};

/// Forecast with `hours` hourly slots starting at midnight, each slot's
/// temperature equal to its index so tests can see which slots were kept.
pub(crate) fn sample_forecast(current_code: i32, hours: usize) -> RawForecast {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    let days = 7;

    RawForecast {
        current: CurrentConditions {
            temperature_c: 18.0,
            wind_speed_kmh: 12.0,
            weather_code: current_code,
        },
        daily: DailySeries {
            dates: (0..days).map(|i| start.date() + Duration::days(i)).collect(),
            temperature_max_c: (0..days).map(|i| Some(20.0 + i as f64)).collect(),
            temperature_min_c: (0..days).map(|i| Some(10.0 + i as f64)).collect(),
            weather_codes: [0, 1, 2, 3, 61, 71, 95].into_iter().map(Some).collect(),
        },
        hourly: HourlySeries {
            timestamps: (0..hours).map(|i| start + Duration::hours(i as i64)).collect(),
            temperature_c: (0..hours).map(|i| Some(i as f64)).collect(),
            weather_codes: vec![Some(current_code); hours],
        },
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeGeocoder {
    places: HashMap<String, LocationResult>,
    gates: HashMap<String, Arc<Notify>>,
    failure: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn with_place(mut self, query: &str, name: &str, lat: f64, lon: f64) -> Self {
        self.places.insert(
            query.to_string(),
            LocationResult {
                coordinate: Coordinate::new(lat, lon),
                display_name: name.to_string(),
            },
        );
        self
    }

    /// Hold lookups of `query` until `gate` is notified.
    pub fn gated(mut self, query: &str, gate: Arc<Notify>) -> Self {
        self.gates.insert(query.to_string(), gate);
        self
    }

    pub fn failing(message: &str) -> Self {
        Self { failure: Some(message.to_string()), ..Self::default() }
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, query: &str) -> Result<Vec<LocationResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = self.gates.get(query) {
            gate.notified().await;
        }
        if let Some(message) = &self.failure {
            return Err(anyhow!("{message}"));
        }
        Ok(self.places.get(query).cloned().into_iter().collect())
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeForecast {
    by_coordinate: Vec<(Coordinate, RawForecast)>,
    gates: Vec<(Coordinate, Arc<Notify>)>,
    pub seen: Mutex<Vec<Coordinate>>,
}

impl FakeForecast {
    pub fn with_forecast(mut self, coordinate: Coordinate, raw: RawForecast) -> Self {
        self.by_coordinate.push((coordinate, raw));
        self
    }

    /// Hold forecasts for `coordinate` until `gate` is notified.
    pub fn gated(mut self, coordinate: Coordinate, gate: Arc<Notify>) -> Self {
        self.gates.push((coordinate, gate));
        self
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl ForecastSource for FakeForecast {
    async fn forecast(&self, coordinate: Coordinate) -> Result<RawForecast> {
        self.seen.lock().unwrap().push(coordinate);
        wait_for_gate(&self.gates, coordinate).await;
        self.by_coordinate
            .iter()
            .find(|(c, _)| *c == coordinate)
            .map(|(_, raw)| raw.clone())
            .ok_or_else(|| anyhow!("forecast service returned 503"))
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeLocalTime {
    text: Option<String>,
    gates: Vec<(Coordinate, Arc<Notify>)>,
    pub calls: AtomicUsize,
}

impl FakeLocalTime {
    pub fn returning(text: &str) -> Self {
        Self { text: Some(text.to_string()), ..Self::default() }
    }

    pub fn gated(mut self, coordinate: Coordinate, gate: Arc<Notify>) -> Self {
        self.gates.push((coordinate, gate));
        self
    }
}

#[async_trait]
impl LocalTimeSource for FakeLocalTime {
    async fn local_time(&self, coordinate: Coordinate) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        wait_for_gate(&self.gates, coordinate).await;
        self.text.clone().ok_or_else(|| anyhow!("timezone lookup failed"))
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeAirQuality {
    index: Option<i32>,
    pub calls: AtomicUsize,
}

impl FakeAirQuality {
    pub fn returning(index: i32) -> Self {
        Self { index: Some(index), ..Self::default() }
    }
}

#[async_trait]
impl AirQualitySource for FakeAirQuality {
    async fn air_quality_index(&self, _coordinate: Coordinate) -> Result<i32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.index.ok_or_else(|| anyhow!("air quality service unreachable"))
    }
}

async fn wait_for_gate(gates: &[(Coordinate, Arc<Notify>)], coordinate: Coordinate) {
    if let Some((_, gate)) = gates.iter().find(|(c, _)| *c == coordinate) {
        gate.notified().await;
    }
}

/// Shared handles to the fakes behind a [`Providers`] bundle.
pub(crate) struct Fakes {
    pub geocoder: Arc<FakeGeocoder>,
    pub forecast: Arc<FakeForecast>,
    pub local_time: Arc<FakeLocalTime>,
    pub air_quality: Arc<FakeAirQuality>,
}

impl Fakes {
    pub fn new(
        geocoder: FakeGeocoder,
        forecast: FakeForecast,
        local_time: FakeLocalTime,
        air_quality: FakeAirQuality,
    ) -> Self {
        Self {
            geocoder: Arc::new(geocoder),
            forecast: Arc::new(forecast),
            local_time: Arc::new(local_time),
            air_quality: Arc::new(air_quality),
        }
    }

    pub fn providers(&self) -> Providers {
        Providers {
            geocoder: self.geocoder.clone(),
            forecast: self.forecast.clone(),
            local_time: self.local_time.clone(),
            air_quality: self.air_quality.clone(),
        }
    }

    pub fn geocode_calls(&self) -> usize {
        self.geocoder.calls.load(Ordering::SeqCst)
    }

    pub fn auxiliary_calls(&self) -> usize {
        self.local_time.calls.load(Ordering::SeqCst) + self.air_quality.calls.load(Ordering::SeqCst)
    }
}
