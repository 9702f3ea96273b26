//! Local time and air quality. Both are best-effort: a failure leaves the
//! field empty and never blocks the other lookup or the forecast.

use crate::{
    error::{AuxiliaryField, PipelineError},
    model::{AuxiliaryData, Coordinate},
    provider::{AirQualitySource, LocalTimeSource},
};

pub async fn fetch_local_time(
    source: &dyn LocalTimeSource,
    coordinate: Coordinate,
) -> Result<String, PipelineError> {
    source.local_time(coordinate).await.map_err(|source| PipelineError::AuxiliaryUnavailable {
        field: AuxiliaryField::LocalTime,
        source,
    })
}

pub async fn fetch_air_quality(
    source: &dyn AirQualitySource,
    coordinate: Coordinate,
) -> Result<i32, PipelineError> {
    source.air_quality_index(coordinate).await.map_err(|source| {
        PipelineError::AuxiliaryUnavailable { field: AuxiliaryField::AirQuality, source }
    })
}

/// Run both lookups concurrently and keep whatever succeeded.
pub async fn fetch_auxiliary(
    local_time: &dyn LocalTimeSource,
    air_quality: &dyn AirQualitySource,
    coordinate: Coordinate,
) -> AuxiliaryData {
    let (time, aqi) = tokio::join!(
        fetch_local_time(local_time, coordinate),
        fetch_air_quality(air_quality, coordinate),
    );

    AuxiliaryData { local_time: best_effort(time), air_quality_index: best_effort(aqi) }
}

fn best_effort<T>(result: Result<T, PipelineError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("{e}");
            None
        }
    }
}
