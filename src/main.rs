use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use stockroom_core::{AppError, Config};
use stockroom_services::{ItemBackend, ItemClient, SqliteItemStore};
use stockroom_weather::WeatherLookup;
use stockroom_web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    stockroom_core::init()?;

    // Optional explicit config file as the first argument.
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    if let Err(e) = run(config_path.as_deref()).await {
        tracing::error!("{}", e.user_message());
        return Err(e.into());
    }
    Ok(())
}

async fn run(config_path: Option<&Path>) -> Result<(), AppError> {
    let (config, _) = Config::load_validated(config_path).map_err(AppError::classify)?;

    if let Some(parent) = config.database.path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let store = SqliteItemStore::open(&config.database.path)?;
    tracing::info!(
        "Item database: {} ({} items)",
        config.database.path.display(),
        store.count()?
    );

    let lookup = WeatherLookup::new(&config.weather.geocode_url, &config.weather.weather_url)
        .context("Failed to build weather client")?;

    let state = AppState::new(
        ItemClient::new(store),
        lookup,
        config.weather.api_key().map(str::to_string),
    )
    .context("Failed to load templates")?;

    stockroom_web::serve(state, &config.server.bind_addr()).await?;

    tracing::info!("Stockroom stopped");
    Ok(())
}
