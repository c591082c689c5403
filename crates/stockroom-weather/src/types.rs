use serde::{Deserialize, Serialize};

/// Geographic coordinates resolved for a city
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions for a requested city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// City exactly as the caller asked for it
    pub city: String,
    /// Degrees Celsius
    pub temperature: f64,
    pub description: String,
    /// Relative humidity, percent
    pub humidity: u8,
    pub wind_speed: f64,
}

/// Weather lookup errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("OpenWeather API key not configured")]
    Configuration,
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("Weather request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Weather request failed: malformed response: {0}")]
    MalformedResponse(String),
}

impl WeatherError {
    /// True for failures of the remote call itself rather than of the input.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::MalformedResponse(_))
    }
}

// Wire formats of the remote services. Only the fields we read are modelled.

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeCandidate {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherResponse {
    pub main: MainReadings,
    pub weather: Vec<ConditionSummary>,
    pub wind: WindReadings,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainReadings {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionSummary {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindReadings {
    pub speed: f64,
}
