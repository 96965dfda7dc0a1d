//! Yelp Fusion collector (§4.1). Businesses missing
//! `metadata.yelp_business_id` are skipped silently; the rest follow the
//! status-code contract in the table below.

use async_trait::async_trait;
use pulsearc_core::{phone, Collector};
use pulsearc_domain::constants::SOURCE_YELP;
use pulsearc_domain::{BusinessData, BusinessMetadata, BusinessUpdate, CollectorError, SkipReason};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct YelpBusiness {
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    is_closed: bool,
}

pub struct YelpCollector {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl YelpCollector {
    pub fn new(http: HttpClient, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into(), api_key: api_key.into() }
    }

    async fn fetch_one(
        &self,
        business: &BusinessMetadata,
    ) -> Result<Option<BusinessData>, CollectorError> {
        let Some(yelp_id) = business.yelp_business_id() else {
            let reason = SkipReason::MissingMetadata("yelp_business_id".to_string());
            debug!(business_id = %business.business_id, %reason, "skipping business");
            return Ok(None);
        };

        let url = format!("{}/{}", self.base_url, yelp_id);
        let response = self
            .http
            .send(
                self.http
                    .request(Method::GET, &url)
                    .bearer_auth(&self.api_key),
            )
            .await
            .map_err(|e| CollectorError::Fatal(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let body: YelpBusiness = response
                    .json()
                    .await
                    .map_err(|e| CollectorError::Fatal(format!("malformed yelp response: {e}")))?;

                let phones = body
                    .phone
                    .map(|raw| vec![phone::normalize(&raw)])
                    .unwrap_or_default();

                Ok(Some(BusinessData {
                    source: SOURCE_YELP.to_string(),
                    website_live: true,
                    business_open: !body.is_closed,
                    business_phones: phones,
                }))
            }
            StatusCode::UNAUTHORIZED => {
                Err(CollectorError::Unauthorized("yelp rejected api key".to_string()))
            }
            StatusCode::NOT_FOUND => {
                let reason = SkipReason::BusinessNotFound(yelp_id.to_string());
                warn!(business_id = %business.business_id, %reason, "skipping business");
                Ok(None)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                Err(CollectorError::RateLimited("yelp rate limit exceeded".to_string()))
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
impl Collector for YelpCollector {
    fn name(&self) -> &str {
        SOURCE_YELP
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
