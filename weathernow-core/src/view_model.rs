//! Renderer-facing aggregate built from one run's raw responses.

use serde::Serialize;

use crate::{
    classify::{
        AdvisoryTheme, AqiCategory, BackgroundTheme, WeatherKind, particle_color,
        temperature_advice, weather_description, weather_emoji,
    },
    model::{
        AuxiliaryData, CurrentConditions, DailyForecastEntry, DailySeries, HourlyForecastEntry,
        HourlySeries, LocationResult, RawForecast,
    },
};

/// Hourly entries shown starting at the current hour.
pub const HOURLY_WINDOW: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    #[serde(flatten)]
    pub conditions: CurrentConditions,
    pub emoji: &'static str,
    pub description: &'static str,
    pub background: BackgroundTheme,
    pub card_theme: AdvisoryTheme,
    pub advice: &'static str,
    pub particle_color: &'static str,
}

impl CurrentView {
    pub fn classify(conditions: CurrentConditions) -> Self {
        let code = conditions.weather_code;
        Self {
            conditions,
            emoji: weather_emoji(code),
            description: weather_description(code),
            background: BackgroundTheme::from_code(code),
            card_theme: AdvisoryTheme::from_code(code),
            advice: temperature_advice(conditions.temperature_c),
            particle_color: particle_color(Some(conditions.temperature_c)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityView {
    pub index: i32,
    pub category: AqiCategory,
    pub label: &'static str,
    pub advice: &'static str,
    pub theme: &'static str,
}

impl AirQualityView {
    pub fn classify(index: i32) -> Self {
        let category = AqiCategory::from_index(index);
        Self {
            index,
            category,
            label: category.label(),
            advice: category.advice(),
            theme: category.theme(),
        }
    }
}

/// Everything a renderer needs. A populated view never carries an error, and an
/// errored view carries no forecast data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewModel {
    pub location: Option<LocationResult>,
    pub current: Option<CurrentView>,
    pub hourly: Vec<HourlyForecastEntry>,
    pub daily: Vec<DailyForecastEntry>,
    pub auxiliary: AuxiliaryData,
    pub air_quality: Option<AirQualityView>,
    pub error: Option<String>,
}

impl ViewModel {
    /// `start_hour` is the caller's local hour, which need not match the
    /// destination's clock.
    pub fn build(
        location: LocationResult,
        raw: &RawForecast,
        auxiliary: AuxiliaryData,
        start_hour: usize,
    ) -> Self {
        Self {
            location: Some(location),
            current: Some(CurrentView::classify(raw.current)),
            hourly: hourly_window(&raw.hourly, start_hour),
            daily: daily_entries(&raw.daily),
            air_quality: auxiliary.air_quality_index.map(AirQualityView::classify),
            auxiliary,
            error: None,
        }
    }

    pub fn errored(message: impl Into<String>) -> Self {
        Self { error: Some(message.into()), ..Self::default() }
    }

    pub fn is_ready(&self) -> bool {
        self.error.is_none() && self.current.is_some()
    }

    /// Background for the page; with nothing loaded it falls back to code 0.
    pub fn background(&self) -> BackgroundTheme {
        let code = self.current.as_ref().map_or(0, |c| c.conditions.weather_code);
        BackgroundTheme::from_code(code)
    }

    pub fn particle_color(&self) -> &'static str {
        particle_color(self.current.as_ref().map(|c| c.conditions.temperature_c))
    }
}

/// Up to [`HOURLY_WINDOW`] entries starting at index `start_hour`. Never wraps
/// and never pads; empty when `start_hour` is past the end.
pub fn hourly_window(series: &HourlySeries, start_hour: usize) -> Vec<HourlyForecastEntry> {
    series
        .timestamps
        .iter()
        .zip(&series.temperature_c)
        .zip(&series.weather_codes)
        .skip(start_hour)
        .take(HOURLY_WINDOW)
        .map(|((&timestamp, &temperature_c), &weather_code)| {
            let kind = kind_of(weather_code);
            HourlyForecastEntry {
                timestamp,
                temperature_c,
                weather_code,
                emoji: kind.emoji(),
                description: kind.description(),
            }
        })
        .collect()
}

/// One entry per provider day, in provider order.
pub fn daily_entries(series: &DailySeries) -> Vec<DailyForecastEntry> {
    series
        .dates
        .iter()
        .zip(&series.temperature_max_c)
        .zip(&series.temperature_min_c)
        .zip(&series.weather_codes)
        .map(|(((&date, &temperature_max_c), &temperature_min_c), &weather_code)| {
            let kind = kind_of(weather_code);
            DailyForecastEntry {
                date,
                temperature_max_c,
                temperature_min_c,
                weather_code,
                emoji: kind.emoji(),
                description: kind.description(),
            }
        })
        .collect()
}

fn kind_of(code: Option<i32>) -> WeatherKind {
    code.map_or(WeatherKind::Unknown, WeatherKind::from_code)
}
