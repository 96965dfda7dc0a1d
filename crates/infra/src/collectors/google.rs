//! Google Places collector (§4.1). Same status-to-error mapping as Yelp;
//! requires `metadata.google_place_id`.

use async_trait::async_trait;
use pulsearc_core::{phone, Collector};
use pulsearc_domain::constants::SOURCE_GOOGLE;
use pulsearc_domain::{BusinessData, BusinessMetadata, BusinessUpdate, CollectorError, SkipReason};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::http::HttpClient;

const FIELDS: &str =
    "formatted_address,name,permanently_closed,url,place_id,website,business_status,formatted_phone_number";

#[derive(Debug, Deserialize)]
struct PlacesEnvelope {
    result: PlaceResult,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    #[serde(default)]
    business_status: Option<String>,
    #[serde(default)]
    formatted_phone_number: Option<String>,
}

pub struct GoogleCollector {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl GoogleCollector {
    pub fn new(http: HttpClient, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into(), api_key: api_key.into() }
    }

    async fn fetch_one(
        &self,
        business: &BusinessMetadata,
    ) -> Result<Option<BusinessData>, CollectorError> {
        let Some(place_id) = business.google_place_id() else {
            let reason = SkipReason::MissingMetadata("google_place_id".to_string());
            debug!(business_id = %business.business_id, %reason, "skipping business");
            return Ok(None);
        };

        let url = format!(
            "{}?place_id={}&fields={}&key={}",
            self.base_url, place_id, FIELDS, self.api_key
        );
        let response = self
            .http
            .send(self.http.request(Method::GET, &url))
            .await
            .map_err(|e| CollectorError::Fatal(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let body: PlacesEnvelope = response
                    .json()
                    .await
                    .map_err(|e| CollectorError::Fatal(format!("malformed places response: {e}")))?;

                let phones = body
                    .result
                    .formatted_phone_number
                    .map(|raw| vec![phone::normalize(&raw)])
                    .unwrap_or_default();

                let business_open =
                    body.result.business_status.as_deref() == Some("OPERATIONAL");

                Ok(Some(BusinessData {
                    source: SOURCE_GOOGLE.to_string(),
                    website_live: true,
                    business_open,
                    business_phones: phones,
                }))
            }
            StatusCode::UNAUTHORIZED => {
                Err(CollectorError::Unauthorized("google rejected api key".to_string()))
            }
            StatusCode::NOT_FOUND => {
                let reason = SkipReason::BusinessNotFound(place_id.to_string());
                warn!(business_id = %business.business_id, %reason, "skipping business");
                Ok(None)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                Err(CollectorError::RateLimited("google rate limit exceeded".to_string()))
            }
            status => {
                let reason = SkipReason::InvalidApiResponse(status.to_string());
                warn!(business_id = %business.business_id, %reason, "skipping business");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl Collector for GoogleCollector {
    fn name(&self) -> &str {
        SOURCE_GOOGLE
    }

    #[instrument(skip(self, businesses), fields(count = businesses.len()))]
    async fn collect(
        &self,
        businesses: &[BusinessMetadata],
    ) -> Result<Vec<BusinessUpdate>, CollectorError> {
        let mut updates = Vec::new();
        for business in businesses {
            if let Some(data) = self.fetch_one(business).await? {
                updates.push(BusinessUpdate { metadata: business.clone(), data });
            }
        }
        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use uuid::Uuid;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn business_with(place_id: Option<&str>) -> BusinessMetadata {
        let mut metadata = HashMap::new();
        if let Some(id) = place_id {
            metadata.insert("google_place_id".to_string(), serde_json::json!(id));
        }
        BusinessMetadata {
            business_id: Uuid::nil(),
            business_name: "Example Diner".into(),
            business_uri: "https://example.com".into(),
            metadata,
        }
    }

    #[tokio::test]
    async fn operational_business_is_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {
                    "business_status": "OPERATIONAL",
                    "formatted_phone_number": "(555) 123-4567",
                }
            })))
            .mount(&server)
            .await;

        let http = HttpClient::builder().max_attempts(1).build().unwrap();
        let collector = GoogleCollector::new(http, server.uri(), "key");
        let updates = collector.collect(&[business_with(Some("place123"))]).await.unwrap();

        assert_eq!(updates.len(), 1);
        assert!(updates[0].data.business_open);
        assert_eq!(updates[0].data.business_phones, vec!["5551234567".to_string()]);
    }

    #[tokio::test]
    async fn closed_permanently_is_not_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {"business_status": "CLOSED_PERMANENTLY"}
            })))
            .mount(&server)
            .await;

        let http = HttpClient::builder().max_attempts(1).build().unwrap();
        let collector = GoogleCollector::new(http, server.uri(), "key");
        let updates = collector.collect(&[business_with(Some("place123"))]).await.unwrap();

        assert!(!updates[0].data.business_open);
    }

    #[tokio::test]
    async fn skips_business_without_place_id() {
        let http = HttpClient::builder().max_attempts(1).build().unwrap();
        let collector = GoogleCollector::new(http, "http://127.0.0.1:1", "key");
        let updates = collector.collect(&[business_with(None)]).await.unwrap();
        assert!(updates.is_empty());
    }
}
