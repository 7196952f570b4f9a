use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    config::DEFAULT_BASE_URL,
    error::{FetchError, GENERIC_PROVIDER_MESSAGE, describe_error},
    model::WeatherRecord,
    provider::normalize_city,
};

use super::WeatherProvider;

/// Client for the WeatherAPI.com `current.json` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    #[instrument(name = "weatherapi_current", skip(self))]
    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        debug!(url = %self.base_url, "Requesting current conditions");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("aqi", "no"),
            ])
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(describe_error(&e.without_url())))?;

        if status.is_client_error() || status.is_server_error() {
            let message = provider_message(&body);
            warn!(%status, %message, "WeatherAPI returned an error");

            return Err(FetchError::Provider {
                city: city.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let parsed: WaResponse = serde_json::from_str(&body).map_err(|e| {
            FetchError::Unexpected(format!("Failed to parse WeatherAPI current JSON: {e}"))
        })?;

        let record = WeatherRecord::from(parsed);
        debug!(?record, "Parsed current conditions");

        Ok(record)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn fetch(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        let city = normalize_city(city)?;
        self.fetch_current(city).await
    }
}

/// Transport failures are network errors; a request that could not even be
/// built (bad base URL) is not.
fn classify_send_error(err: reqwest::Error) -> FetchError {
    let is_builder = err.is_builder();
    // The URL carries the API key.
    let description = describe_error(&err.without_url());

    if is_builder {
        FetchError::Unexpected(format!("Invalid WeatherAPI request: {description}"))
    } else {
        FetchError::Network(description)
    }
}

/// `error.message` from an error body, or the generic message when the body
/// is not the provider's error shape.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<WaErrorResponse>(body)
        .ok()
        .map(|parsed| parsed.error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_PROVIDER_MESSAGE.to_string())
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    temp_f: f64,
    feelslike_c: f64,
    feelslike_f: f64,
    condition: WaCondition,
    humidity: f64,
    wind_kph: f64,
    wind_dir: String,
    pressure_mb: f64,
    vis_km: f64,
    uv: f64,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaErrorResponse {
    error: WaErrorDetail,
}

impl From<WaResponse> for WeatherRecord {
    fn from(parsed: WaResponse) -> Self {
        let WaResponse { location, current } = parsed;

        WeatherRecord {
            location_name: location.name,
            country: location.country,
            temp_c: current.temp_c,
            temp_f: current.temp_f,
            feelslike_c: current.feelslike_c,
            feelslike_f: current.feelslike_f,
            condition_text: current.condition.text,
            humidity: current.humidity,
            wind_kph: current.wind_kph,
            wind_dir: current.wind_dir,
            pressure_mb: current.pressure_mb,
            vis_km: current.vis_km,
            uv_index: current.uv,
        }
    }
}
