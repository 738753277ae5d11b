//! HTTP client for the remote weather service.
//!
//! Consumes the OpenWeatherMap current-weather endpoint. Only the fields
//! the station merges into its payload are deserialized: temperature
//! (Kelvin), humidity, sunrise/sunset timestamps with the timezone
//! offset, and the leading weather description.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use skylark_types::{ClockTime, WeatherRecord, convert_temp};

use crate::error::FetchError;
use crate::traits::WeatherClient;

/// Default current-weather endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Weather client backed by `reqwest`.
///
/// Every request carries a hard timeout; a slow or hung service surfaces
/// as [`FetchError::Timeout`] and is handled by the cache like any other
/// fetch failure.
#[derive(Debug, Clone)]
pub struct HttpWeatherClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl HttpWeatherClient {
    /// Build a client for the given endpoint and API key.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout,
        })
    }

    /// Build a client against the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn with_api_key(api_key: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        Self::new(DEFAULT_ENDPOINT, api_key, timeout)
    }
}

#[async_trait]
impl WeatherClient for HttpWeatherClient {
    async fn fetch(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        debug!(city, timeout = ?self.timeout, "fetching weather");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("appid", self.api_key.as_str()), ("q", city)])
            .send()
            .await?
            .error_for_status()?;

        let body: ApiResponse = response.json().await?;
        body.into_record(city)
    }
}

/// The slice of the current-weather response the station consumes.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    main: ApiMain,
    weather: Vec<ApiWeather>,
    sys: ApiSys,
    /// Timezone offset from UTC in seconds.
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    /// Temperature in Kelvin.
    temp: f32,
    humidity: f32,
}

#[derive(Debug, Deserialize)]
struct ApiWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiSys {
    /// Sunrise as a Unix timestamp (UTC).
    sunrise: i64,
    /// Sunset as a Unix timestamp (UTC).
    sunset: i64,
}

impl ApiResponse {
    fn into_record(self, city: &str) -> Result<WeatherRecord, FetchError> {
        let (celsius, fahrenheit) = convert_temp(self.main.temp);
        let description = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| {
                FetchError::Parse("response contained no weather entries".to_string())
            })?;
        Ok(WeatherRecord {
            city: city.to_string(),
            temperature_c: Some(celsius),
            temperature_f: Some(fahrenheit),
            humidity_percent: Some(self.main.humidity),
            sunrise: Some(ClockTime::from_unix(self.sys.sunrise, self.timezone).to_string()),
            sunset: Some(ClockTime::from_unix(self.sys.sunset, self.timezone).to_string()),
            description,
        })
    }
}
