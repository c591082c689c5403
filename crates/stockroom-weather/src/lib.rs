//! City weather lookup for Stockroom
//!
//! Resolves a city name to coordinates, then fetches current conditions for
//! those coordinates from OpenWeather.

pub mod geocode;
pub mod provider;
pub mod types;

pub use geocode::geocode;
pub use provider::WeatherLookup;
pub use types::{Coordinates, WeatherError, WeatherReport};
