use crate::{
    Config, FetchError, WeatherResult, config::API_KEY_ENV,
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// A source of current weather conditions.
///
/// One call is one lookup: implementations must not retry or cache.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, place_name: &str) -> Result<WeatherResult, FetchError>;
}

/// Construct the weatherapi.com provider from config.
///
/// A missing key is not an error here; the provider's rejection surfaces
/// as a failed lookup instead.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    if !config.is_configured() {
        tracing::warn!(
            "No API key configured; lookups will fail. \
             Hint: run `weather-widget configure` or set {API_KEY_ENV}."
        );
    }

    let provider = WeatherApiProvider::with_base_url(
        config.api_key_or_empty().to_owned(),
        config.base_url().to_owned(),
    )?;

    Ok(Box::new(provider))
}
