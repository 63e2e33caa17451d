//! HTTP client for the Beer-Garden v1 REST API.

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::{ApiConfig, ApiError};

/// reqwest-backed implementation of the queue and system services.
#[derive(Debug, Clone)]
pub struct BeerGardenClient {
    http: Client,
    base_url: Url,
}

impl BeerGardenClient {
    /// Build a client from connection settings.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);
        let response = self.http.get(url).query(query).send().await?;
        let body = check_status(response).await?.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<(), ApiError> {
        tracing::debug!("DELETE {}", url);
        let response = self.http.delete(url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `ApiError::Status`, reading its body for details.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_body(status.as_u16(), &body))
}
