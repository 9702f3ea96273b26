use crate::{
    error::PipelineError,
    model::{Coordinate, RawForecast},
    provider::ForecastSource,
};

/// Fetch the forecast for `coordinate`. Any failure, including a payload whose
/// parallel arrays disagree, is fatal to the run.
pub async fn fetch_forecast(
    source: &dyn ForecastSource,
    coordinate: Coordinate,
) -> Result<RawForecast, PipelineError> {
    let raw = source
        .forecast(coordinate)
        .await
        .and_then(|raw| raw.validate().map(|()| raw))
        .map_err(|e| {
            tracing::warn!(%coordinate, "forecast fetch failed: {e:#}");
            PipelineError::ForecastUnavailable(e)
        })?;

    tracing::debug!(
        %coordinate,
        days = raw.daily.dates.len(),
        hours = raw.hourly.timestamps.len(),
        "fetched forecast"
    );

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeForecast, sample_forecast};

    #[tokio::test]
    async fn returns_validated_forecast() {
        let here = Coordinate::new(48.8566, 2.3522);
        let source = FakeForecast::default().with_forecast(here, sample_forecast(0, 48));

        let raw = fetch_forecast(&source, here).await.unwrap();

        assert_eq!(raw.hourly.timestamps.len(), 48);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn provider_error_is_forecast_unavailable() {
        let source = FakeForecast::default();

        let err = fetch_forecast(&source, Coordinate::new(1.0, 1.0)).await.unwrap_err();

        assert!(matches!(err, PipelineError::ForecastUnavailable(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn misaligned_arrays_are_forecast_unavailable() {
        let here = Coordinate::new(0.0, 0.0);
        let mut raw = sample_forecast(0, 24);
        raw.daily.weather_codes.pop();
        let source = FakeForecast::default().with_forecast(here, raw);

        let err = fetch_forecast(&source, here).await.unwrap_err();

        assert!(matches!(err, PipelineError::ForecastUnavailable(_)));
    }
}
