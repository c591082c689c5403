//! Forward geocoding: resolve a city name to coordinates.
//! Uses the OpenWeather direct geocoding endpoint, asking for one candidate.

use crate::types::{Coordinates, GeocodeCandidate, WeatherError};
use reqwest::Client;

/// Resolve `city` to its best-matching coordinates.
///
/// Returns `Ok(None)` when the service knows no such place.
pub async fn geocode(
    client: &Client,
    endpoint: &str,
    city: &str,
    api_key: &str,
) -> Result<Option<Coordinates>, WeatherError> {
    tracing::debug!("Geocoding city: {}", city);

    let candidates: Vec<GeocodeCandidate> = client
        .get(endpoint)
        .query(&[("q", city), ("limit", "1"), ("appid", api_key)])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let coords = candidates.into_iter().next().map(|c| Coordinates {
        latitude: c.lat,
        longitude: c.lon,
    });

    match coords {
        Some(c) => tracing::debug!("Geocoded {} to {}, {}", city, c.latitude, c.longitude),
        None => tracing::debug!("No geocoding candidates for {}", city),
    }

    Ok(coords)
}
