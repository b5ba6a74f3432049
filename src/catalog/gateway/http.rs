//! HTTP implementation of the catalogue gateways.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::{BoatDataGateway, RecordGateway};
use crate::catalog::error::CatalogError;
use crate::catalog::models::{
    ApiBoat, ApiReview, Boat, BoatTypeFilter, LocationQuery, RecordId, RecordInput, Review,
};

/// Request timeout used when none is configured, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Configuration for [`HttpCatalogGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCatalogConfig {
    /// Base URL of the catalogue service, e.g. `https://boats.example/api`.
    pub base_url: Url,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl HttpCatalogConfig {
    /// Parses the base URL and applies the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when `base_url` is not a valid
    /// absolute URL.
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let parsed = Url::parse(base_url).map_err(|error| CatalogError::Configuration {
            message: format!("catalogue base URL '{base_url}' is invalid: {error}"),
        })?;
        Ok(Self {
            base_url: parsed,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Replaces the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Gateway that talks to the catalogue service over JSON/HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogGateway {
    client: Client,
    base_url: Url,
}

impl HttpCatalogGateway {
    /// Builds a gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &HttpCatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| CatalogError::Configuration {
                message: format!("failed to configure catalogue HTTP client: {error}"),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Joins path segments onto the base URL, keeping any base path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::Configuration {
                message: format!("catalogue base URL '{}' cannot be a base", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(operation: &str, request: RequestBuilder) -> Result<Response, CatalogError> {
        let response = request
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(map_status_error(operation, response).await)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: Url,
    ) -> Result<T, CatalogError> {
        let response = Self::send(operation, self.client.get(url)).await?;
        response
            .json::<T>()
            .await
            .map_err(|error| map_transport_error(operation, &error))
    }
}

#[async_trait]
impl BoatDataGateway for HttpCatalogGateway {
    async fn reviews(&self, boat_id: &RecordId) -> Result<Vec<Review>, CatalogError> {
        let mut url = self.endpoint(&["reviews"])?;
        url.query_pairs_mut().append_pair("boatId", boat_id.as_str());
        let rows: Vec<ApiReview> = self.get_json("reviews", url).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn boats(&self, filter: &BoatTypeFilter) -> Result<Vec<Boat>, CatalogError> {
        let mut url = self.endpoint(&["boats"])?;
        url.query_pairs_mut()
            .append_pair("boatTypeId", filter.query_value());
        let rows: Vec<ApiBoat> = self.get_json("boats", url).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn boats_by_location(&self, query: &LocationQuery) -> Result<String, CatalogError> {
        let mut url = self.endpoint(&["boats", "nearby"])?;
        url.query_pairs_mut()
            .append_pair("latitude", &query.coordinates.latitude.to_string())
            .append_pair("longitude", &query.coordinates.longitude.to_string())
            .append_pair("boatTypeId", query.boat_type.query_value());
        let response = Self::send("nearby boats", self.client.get(url)).await?;
        response
            .text()
            .await
            .map_err(|error| map_transport_error("nearby boats", &error))
    }
}

#[async_trait]
impl RecordGateway for HttpCatalogGateway {
    async fn update_record(&self, input: &RecordInput) -> Result<(), CatalogError> {
        let url = self.endpoint(&["records", input.id.as_str()])?;
        Self::send("update record", self.client.patch(url).json(&input.fields)).await?;
        Ok(())
    }
}

/// Error body shapes returned by the service.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiErrorBody {
    Single { message: String },
    List(Vec<ApiErrorEntry>),
}

#[derive(Debug, Deserialize)]
struct ApiErrorEntry {
    message: String,
}

fn map_transport_error(operation: &str, error: &reqwest::Error) -> CatalogError {
    if error.is_decode() {
        return CatalogError::Decode {
            message: format!("{operation}: {error}"),
        };
    }
    CatalogError::Network {
        message: format!("{operation}: {error}"),
    }
}

async fn map_status_error(operation: &str, response: Response) -> CatalogError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_message(&body).unwrap_or_else(|| fallback_message(operation, status));
    tracing::warn!("{operation} failed with status {status}: {message}");
    CatalogError::Api { message }
}

fn extract_message(body: &str) -> Option<String> {
    match serde_json::from_str::<ApiErrorBody>(body).ok()? {
        ApiErrorBody::Single { message } => Some(message),
        ApiErrorBody::List(entries) => entries.into_iter().next().map(|entry| entry.message),
    }
}

fn fallback_message(operation: &str, status: StatusCode) -> String {
    format!(
        "{operation} failed: {status}",
        status = status.canonical_reason().unwrap_or_else(|| status.as_str())
    )
}
