use crate::geocode::geocode;
use crate::types::{Coordinates, CurrentWeatherResponse, WeatherError, WeatherReport};
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Two-step city weather lookup: geocode, then current conditions.
///
/// The two calls are strictly sequential and never retried. Dropping the
/// returned future aborts whichever call is in flight.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    client: Client,
    geocode_url: String,
    weather_url: String,
}

impl WeatherLookup {
    /// Build a lookup against the given geocoding and current-weather endpoints.
    pub fn new(
        geocode_url: impl Into<String>,
        weather_url: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            geocode_url: geocode_url.into(),
            weather_url: weather_url.into(),
        })
    }

    /// Fetch current weather for `city`.
    ///
    /// # Errors
    /// - `Configuration` if `api_key` is missing or blank; no request is made.
    /// - `CityNotFound` if geocoding yields no candidates; the weather call is skipped.
    /// - `Transport` / `MalformedResponse` if either call fails.
    pub async fn fetch(
        &self,
        city: &str,
        api_key: Option<&str>,
    ) -> Result<WeatherReport, WeatherError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(WeatherError::Configuration)?;

        let coords = geocode(&self.client, &self.geocode_url, city, api_key)
            .await?
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))?;

        let report = self.current_conditions(city, coords, api_key).await?;
        tracing::info!(
            "Weather for {}: {}°C, {}",
            report.city,
            report.temperature,
            report.description
        );
        Ok(report)
    }

    async fn current_conditions(
        &self,
        city: &str,
        coords: Coordinates,
        api_key: &str,
    ) -> Result<WeatherReport, WeatherError> {
        let lat = coords.latitude.to_string();
        let lon = coords.longitude.to_string();

        let body: CurrentWeatherResponse = self
            .client
            .get(&self.weather_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let description = body
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| {
                WeatherError::MalformedResponse("no weather conditions in response".to_string())
            })?;

        Ok(WeatherReport {
            city: city.to_string(),
            temperature: body.main.temp,
            description,
            humidity: body.main.humidity,
            wind_speed: body.wind.speed,
        })
    }
}
