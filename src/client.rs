//! HTTP client for a running weather server

use crate::app::models::{Airport, AtmosphericInformation, DataPoint, DataPointType, UpdateOutcome};
use crate::app::services::health::HealthReport;
use crate::{Error, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the collector and query endpoints
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::http("Failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET /collect/ping
    pub async fn ping_collect(&self) -> Result<String> {
        let response = self.client.get(self.url("collect/ping")).send().await?;
        let response = check_status(response).await?;
        Ok(response.text().await?)
    }

    /// GET /query/ping
    pub async fn ping_query(&self) -> Result<HealthReport> {
        let response = self.client.get(self.url("query/ping")).send().await?;
        parse_json(response).await
    }

    /// GET /query/weather/{iata}/{radius}
    pub async fn query(&self, iata: &str, radius: f64) -> Result<Vec<AtmosphericInformation>> {
        let url = self.url(&format!("query/weather/{}/{}", iata, radius));
        debug!("Querying {}", url);
        let response = self.client.get(url).send().await?;
        parse_json(response).await
    }

    /// POST /collect/weather/{iata}/{pointType}
    pub async fn populate(
        &self,
        data_type: DataPointType,
        iata: &str,
        data_point: &DataPoint,
    ) -> Result<UpdateOutcome> {
        let url = self.url(&format!("collect/weather/{}/{}", iata, data_type.name()));
        let response = self.client.post(url).json(data_point).send().await?;
        parse_json(response).await
    }

    /// GET /collect/airports
    pub async fn airports(&self) -> Result<Vec<String>> {
        let response = self.client.get(self.url("collect/airports")).send().await?;
        parse_json(response).await
    }

    /// GET /collect/airport/{iata}
    pub async fn airport(&self, iata: &str) -> Result<Airport> {
        let url = self.url(&format!("collect/airport/{}", iata));
        let response = self.client.get(url).send().await?;
        parse_json(response).await
    }

    /// POST /collect/airport/{iata}/{lat}/{long}
    pub async fn add_airport(&self, iata: &str, latitude: f64, longitude: f64) -> Result<Airport> {
        let url = self.url(&format!(
            "collect/airport/{}/{}/{}",
            iata, latitude, longitude
        ));
        let response = self.client.post(url).send().await?;
        parse_json(response).await
    }

    /// DELETE /collect/airport/{iata}
    pub async fn delete_airport(&self, iata: &str) -> Result<Airport> {
        let url = self.url(&format!("collect/airport/{}", iata));
        let response = self.client.delete(url).send().await?;
        parse_json(response).await
    }

    /// GET /collect/exit
    pub async fn exit(&self) -> Result<()> {
        let response = self.client.get(self.url("collect/exit")).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    response
        .json()
        .await
        .map_err(|e| Error::http("Failed to decode response body", e))
}

/// Map error statuses back onto the crate's error variants
async fn check_status(response: Response) -> Result<Response> {
    let error = response.error_for_status_ref().err();
    let Some(error) = error else {
        return Ok(response);
    };

    let status = response.status();
    let url = response.url().clone();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| extract_error_message(&body))
        .unwrap_or_else(|| format!("{} returned {}", url, status));

    Err(match status {
        StatusCode::NOT_FOUND => Error::airport_not_found(last_segment(&url)),
        StatusCode::CONFLICT => Error::duplicate_airport(last_segment(&url)),
        StatusCode::BAD_REQUEST => Error::invalid_query(message),
        _ => Error::http(message, error),
    })
}

fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
}

/// IATA code carried by the request path
fn last_segment(url: &reqwest::Url) -> String {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        ["collect", "airport", code, ..] => code.to_string(),
        ["collect", "weather", code, ..] => code.to_string(),
        ["query", "weather", code, ..] => code.to_string(),
        [.., last] => last.to_string(),
        [] => String::new(),
    }
}
