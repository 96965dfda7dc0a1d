//! HTTP-backed `RegistryClient`, reading the business list from the CRUD
//! facade over `asset_metadata`.

use async_trait::async_trait;
use pulsearc_core::RegistryClient;
use pulsearc_domain::{BusinessMetadata, PulseArcError};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::error::map_status_error;
use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct BusinessesEnvelope {
    data: Vec<BusinessMetadata>,
}

/// Talks to the registry's `GET /texas-real-foods/businesses` endpoint.
pub struct HttpRegistryClient {
    http: HttpClient,
    base_url: String,
}

impl HttpRegistryClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into() }
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    #[instrument(skip(self))]
    async fn get_businesses(&self) -> Result<Vec<BusinessMetadata>, PulseArcError> {
        let url = format!("{}/texas-real-foods/businesses", self.base_url);
        let response = self
            .http
            .send(self.http.request(Method::GET, &url))
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error("fetch businesses", status, &body));
        }

        let envelope: BusinessesEnvelope = response
            .json()
            .await
            .map_err(|e| PulseArcError::InvalidInput(format!("malformed registry response: {e}")))?;

        debug!(count = envelope.data.len(), "fetched businesses from registry");
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client() -> HttpClient {
        HttpClient::builder().max_attempts(1).build().expect("http client")
    }

    #[tokio::test]
    async fn parses_businesses_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/texas-real-foods/businesses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "http_code": 200,
                "data": [],
            })))
            .mount(&server)
            .await;

        let registry = HttpRegistryClient::new(client(), server.uri());
        let businesses = registry.get_businesses().await.expect("businesses");
        assert!(businesses.is_empty());
    }

    #[tokio::test]
    async fn maps_non_success_status_to_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/texas-real-foods/businesses"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let registry = HttpRegistryClient::new(client(), server.uri());
        let err = registry.get_businesses().await.unwrap_err();
        assert!(matches!(err, PulseArcError::Network(_)));
    }
}
