//! Place name to coordinate.
//!
//! The first geocoder match wins; there is no disambiguation between several
//! places with the same name.

use crate::{error::PipelineError, model::LocationResult, provider::Geocoder};

/// Trim the query and reject it if nothing is left.
pub fn validate_query(query: &str) -> Result<&str, PipelineError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(PipelineError::MissingInput);
    }
    Ok(trimmed)
}

pub async fn resolve_location(
    geocoder: &dyn Geocoder,
    query: &str,
) -> Result<LocationResult, PipelineError> {
    let query = validate_query(query)?;

    let matches = geocoder.geocode(query).await.map_err(|e| {
        tracing::warn!(query, "geocoding failed: {e:#}");
        PipelineError::LocationNotFound(query.to_string())
    })?;

    let location = matches
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::LocationNotFound(query.to_string()))?;

    tracing::info!(
        query,
        location = %location.display_name,
        coordinate = %location.coordinate,
        "resolved location"
    );

    Ok(location)
}
