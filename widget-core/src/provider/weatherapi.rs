use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    config::DEFAULT_BASE_URL,
    error::FetchError,
    model::{TemperatureUnit, WeatherResult},
};

use super::WeatherProvider;

/// Client for weatherapi.com's `current.json` endpoint.
#[derive(Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    current_url: Url,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> anyhow::Result<Self> {
        let current = format!("{}/current.json", base_url.trim_end_matches('/'));
        let current_url = Url::parse(&current)
            .with_context(|| format!("Invalid weather API base URL: {base_url}"))?;

        Ok(Self { api_key, current_url, http: Client::new() })
    }

    async fn fetch_current(&self, place_name: &str) -> Result<WeatherResult, FetchError> {
        let res = self
            .http
            .get(self.current_url.clone())
            .query(&[("key", self.api_key.as_str()), ("q", place_name)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: WaResponse = serde_json::from_str(&body)?;

        Ok(WeatherResult {
            temperature: parsed.current.temp_c,
            condition_label: parsed.current.condition.text,
            location_name: parsed.location.name,
            unit: TemperatureUnit::Celsius,
        })
    }
}

impl std::fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiProvider")
            .field("api_key", &"<redacted>")
            .field("current_url", &self.current_url.as_str())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_weather(&self, place_name: &str) -> Result<WeatherResult, FetchError> {
        let result = self.fetch_current(place_name).await;

        match &result {
            Ok(weather) => tracing::debug!(location = %weather.location_name, "lookup succeeded"),
            Err(err) => tracing::warn!(error = %err, "lookup failed"),
        }

        result
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current_json(temp_c: f64, text: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "location": {
                "name": name,
                "region": "Ile-de-France",
                "country": "France",
                "localtime_epoch": 1_760_000_000
            },
            "current": {
                "last_updated_epoch": 1_760_000_000,
                "temp_c": temp_c,
                "temp_f": temp_c * 9.0 / 5.0 + 32.0,
                "condition": { "text": text, "code": 1006 },
                "humidity": 60
            }
        })
    }

    fn provider_for(server: &MockServer) -> WeatherApiProvider {
        WeatherApiProvider::with_base_url("test-key".into(), format!("{}/v1", server.uri()))
            .expect("mock server uri is valid")
    }

    #[tokio::test]
    async fn fetch_weather_parses_current_conditions() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .and(query_param("key", "test-key"))
            .and(query_param("q", "Paris"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_json(
                22.0, "Cloudy", "Paris",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider_for(&server).fetch_weather("Paris").await.unwrap();

        assert_eq!(
            result,
            WeatherResult {
                temperature: 22.0,
                condition_label: "Cloudy".into(),
                location_name: "Paris".into(),
                unit: TemperatureUnit::Celsius,
            }
        );
    }

    #[tokio::test]
    async fn place_name_is_query_encoded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .and(query_param("q", "New York & Co"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_json(
                5.5, "Mist", "New York",
            )))
            .mount(&server)
            .await;

        let result = provider_for(&server).fetch_weather("New York & Co").await.unwrap();

        assert_eq!(result.location_name, "New York");
        assert_eq!(result.temperature, 5.5);
    }

    #[tokio::test]
    async fn not_found_status_is_fetch_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "code": 1006, "message": "No matching location found." }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = provider_for(&server).fetch_weather("Atlantis").await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status, .. } if status.as_u16() == 400));
        assert_eq!(err.user_message(), "City not found. Please try again.");
    }

    #[tokio::test]
    async fn malformed_payload_is_fetch_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "location": { "name": "Paris" } })),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server).fetch_weather("Paris").await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_fetch_error() {
        let provider =
            WeatherApiProvider::with_base_url("test-key".into(), "http://127.0.0.1:1/v1".into())
                .unwrap();

        let err = provider.fetch_weather("Paris").await.unwrap_err();

        assert!(matches!(err, FetchError::Request(_)));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let provider = WeatherApiProvider::new("super-secret".into()).unwrap();
        let debug = format!("{provider:?}");

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("https://api.weatherapi.com/v1/current.json"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(150);
        let truncated = truncate_body(&long);

        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
