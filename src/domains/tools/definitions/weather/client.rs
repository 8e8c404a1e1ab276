//! OpenWeatherMap client.
//!
//! The client is constructed from [`CredentialsConfig`] rather than reading
//! the environment itself, so the missing-key path is testable without
//! environment manipulation. When no key is configured, `fetch` fails before
//! any network activity.

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::core::config::CredentialsConfig;

/// Weather provider endpoint.
pub const OPENWEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Errors that can occur while fetching weather data.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No API key in the configuration. This is a configuration failure,
    /// distinct from any network failure.
    #[error("Weather API key not configured. Set OPENWEATHER_API_KEY environment variable.")]
    MissingApiKey,

    /// The request could not be sent or the transport failed mid-flight.
    #[error("request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status.
    #[error("provider returned status {0}")]
    Status(u16),

    /// The provider response is missing expected fields.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Provider response, reduced to the fields the summary needs.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherReport {
    pub name: String,
    pub sys: SysInfo,
    pub main: MainMetrics,
    pub wind: WindInfo,
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SysInfo {
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainMetrics {
    /// Temperature in Celsius (the request asks for metric units).
    pub temp: f64,
    pub humidity: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindInfo {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub description: String,
}

impl WeatherReport {
    /// Compose the human-readable multi-line summary.
    pub fn summary(&self) -> Result<String, WeatherError> {
        let condition = self.weather.first().ok_or_else(|| {
            WeatherError::MalformedResponse("missing weather condition".to_string())
        })?;

        let temp_f = self.main.temp * 9.0 / 5.0 + 32.0;

        Ok(format!(
            "Weather in {}, {}:\n\
             Temperature: {}°C ({:.1}°F)\n\
             Condition: {}\n\
             Humidity: {}%\n\
             Wind Speed: {} m/s",
            self.name,
            self.sys.country,
            self.main.temp,
            temp_f,
            condition.description,
            self.main.humidity,
            self.wind.speed
        ))
    }
}

/// Weather provider client.
pub struct WeatherClient {
    api_key: Option<String>,
    endpoint: String,
}

impl WeatherClient {
    /// Create a client from the configured credentials.
    pub fn new(credentials: &CredentialsConfig) -> Self {
        Self {
            api_key: credentials.openweather_api_key.clone(),
            endpoint: OPENWEATHER_ENDPOINT.to_string(),
        }
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch current weather for a location and render the summary.
    ///
    /// Blocking; callers run it on a blocking task. The reqwest blocking
    /// client is created per call so it never lives on an async thread.
    pub fn fetch(&self, location: &str) -> Result<String, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        let client = Client::new();
        let response = client
            .get(&self.endpoint)
            .query(&[("q", location), ("appid", api_key), ("units", "metric")])
            .send()
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let report: WeatherReport = response
            .json()
            .map_err(|e| WeatherError::MalformedResponse(e.to_string()))?;

        report.summary()
    }
}
