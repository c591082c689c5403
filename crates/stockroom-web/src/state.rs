use std::sync::Arc;

use stockroom_services::ItemClient;
use stockroom_weather::WeatherLookup;
use tera::Tera;

use crate::views;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub items: ItemClient,
    pub weather: WeatherLookup,
    /// Passed to every weather lookup; `None` makes the endpoint fail with 500.
    pub weather_api_key: Option<String>,
    pub templates: Arc<Tera>,
}

impl AppState {
    /// # Errors
    /// Returns a `tera::Error` if the bundled templates fail to compile.
    pub fn new(
        items: ItemClient,
        weather: WeatherLookup,
        weather_api_key: Option<String>,
    ) -> Result<Self, tera::Error> {
        Ok(Self {
            items,
            weather,
            weather_api_key,
            templates: Arc::new(views::load_templates()?),
        })
    }
}
