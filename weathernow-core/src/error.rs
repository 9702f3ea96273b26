//! Error kinds a forecast run can end with.
//!
//! `MissingInput`, `LocationNotFound` and `ForecastUnavailable` abort the run.
//! `AuxiliaryUnavailable` only ever blanks a single field of the view model.

use thiserror::Error;

/// Which best-effort field could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxiliaryField {
    LocalTime,
    AirQuality,
}

impl std::fmt::Display for AuxiliaryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AuxiliaryField::LocalTime => "local time",
            AuxiliaryField::AirQuality => "air quality",
        })
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no place name was given")]
    MissingInput,

    #[error("no location found for '{0}'")]
    LocationNotFound(String),

    #[error("forecast unavailable: {0:#}")]
    ForecastUnavailable(#[source] anyhow::Error),

    #[error("{field} unavailable: {source:#}")]
    AuxiliaryUnavailable {
        field: AuxiliaryField,
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    /// Message shown to the user in place of the forecast.
    pub fn user_message(&self) -> &'static str {
        match self {
            PipelineError::MissingInput => "Please enter a city",
            PipelineError::LocationNotFound(_) => {
                "City not found. Please enter a valid city name."
            }
            PipelineError::ForecastUnavailable(_) => {
                "Weather data is unavailable right now. Please try again."
            }
            PipelineError::AuxiliaryUnavailable { .. } => "Some details could not be loaded.",
        }
    }

    /// Whether this error ends the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PipelineError::AuxiliaryUnavailable { .. })
    }
}
