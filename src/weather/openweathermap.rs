//! OpenWeatherMap current-weather client

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Number;
use tracing::{debug, info, instrument, warn};

use super::{WeatherError, WeatherProvider, WeatherSnapshot};
use crate::config::WeatherConfig;

pub struct OpenWeatherMapClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    weather: Vec<Condition>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: Number,
}

impl OpenWeatherMapClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            "itinerary-planner/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds.into()));
        }
        let client = builder
            .build()
            .with_context(|| "Failed to create weather HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn current_weather_url(&self, destination: &str, api_key: &str) -> String {
        format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(destination),
            urlencoding::encode(api_key)
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn current_weather(&self, destination: &str) -> Result<WeatherSnapshot, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        info!("Fetching weather data for {}", destination);
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.current_weather_url(destination, api_key))
            .send()
            .await
            .map_err(|e| WeatherError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Weather API returned {}", status);
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| WeatherError::Transport(e.without_url().to_string()))?;
        let payload: CurrentWeatherResponse = serde_json::from_slice(&bytes)
            .map_err(|e| WeatherError::MalformedResponse(e.to_string()))?;

        let description = payload
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.description)
            .ok_or_else(|| WeatherError::MalformedResponse("empty weather array".to_string()))?;

        debug!(
            "Weather response parsed in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );

        Ok(WeatherSnapshot {
            temperature: payload.main.temp,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server_uri: &str, api_key: Option<&str>) -> OpenWeatherMapClient {
        client_with_timeout(server_uri, api_key, None)
    }

    fn client_with_timeout(
        server_uri: &str,
        api_key: Option<&str>,
        timeout_seconds: Option<u32>,
    ) -> OpenWeatherMapClient {
        let config = WeatherConfig {
            api_key: api_key.map(str::to_string),
            base_url: server_uri.to_string(),
            timeout_seconds,
        };
        OpenWeatherMapClient::new(&config).expect("client")
    }

    #[tokio::test]
    async fn test_current_weather_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Paris, France"))
            .and(query_param("appid", "owm-key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "weather": [{"id": 500, "main": "Rain", "description": "light rain"}],
                "main": {"temp": 14.23, "humidity": 81},
                "name": "Paris"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), Some("owm-key"));
        let snapshot = client.current_weather("Paris, France").await.unwrap();

        assert_eq!(snapshot.description, "light rain");
        assert_eq!(snapshot.to_string(), "14.23°C with light rain.");
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let mock_server = MockServer::start().await;
        let client = client_for(&mock_server.uri(), None);

        let result = client.current_weather("Paris, France").await;

        assert!(matches!(result, Err(WeatherError::MissingApiKey)));
        let received = mock_server.received_requests().await.unwrap_or_default();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_string("city not found"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), Some("owm-key"));
        let result = client.current_weather("Atlantis").await;

        match result {
            Err(WeatherError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "city not found");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_fields_are_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"main": {"temp": 3.0}})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), Some("owm-key"));
        let result = client.current_weather("Oslo").await;

        assert!(matches!(result, Err(WeatherError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_empty_weather_array_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "weather": [],
                "main": {"temp": 3.0}
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), Some("owm-key"));
        let result = client.current_weather("Oslo").await;

        assert!(matches!(result, Err(WeatherError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Nothing listens on port 1
        let client = client_for("http://127.0.0.1:1", Some("owm-key"));
        let result = client.current_weather("Oslo").await;

        assert!(matches!(result, Err(WeatherError::Transport(_))));
    }

    #[tokio::test]
    async fn test_slow_response_times_out_as_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "weather": [{"description": "clear sky"}],
                        "main": {"temp": 21.0}
                    }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = client_with_timeout(&mock_server.uri(), Some("owm-key"), Some(1));
        let result = client.current_weather("Oslo").await;

        assert!(matches!(result, Err(WeatherError::Transport(_))));
    }
}
