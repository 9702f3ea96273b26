//! Core library for the Weather Now dashboard.
//!
//! This crate defines:
//! - The forecast pipeline: place name in, renderer-ready view model out
//! - Adapters for the geocoding, forecast, local-time and air-quality services
//! - Classifier tables mapping weather codes, temperatures and AQI to presentation
//! - Configuration & credentials handling
//!
//! Renderers drive a [`Pipeline`] and observe its [`Snapshot`]s; they hold no
//! forecast logic of their own.

pub mod auxiliary;
pub mod classify;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod view_model;

#[cfg(test)]
mod testing;

pub use config::{Config, Endpoints, ProviderConfig};
pub use error::{AuxiliaryField, PipelineError};
pub use model::{
    AuxiliaryData, Coordinate, CurrentConditions, DailyForecastEntry, HourlyForecastEntry,
    LocationResult, RawForecast,
};
pub use pipeline::{Clock, LocalClock, Pipeline, PipelineState, RunOutcome, Snapshot};
pub use provider::{ProviderId, Providers};
pub use view_model::{AirQualityView, CurrentView, ViewModel};
