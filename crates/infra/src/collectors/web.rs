//! Web Scraper collector (§4.1): a plain GET against each business's own
//! site, with phone extraction and advisory phone validation.

use std::sync::Arc;

use async_trait::async_trait;
use pulsearc_core::phone;
use pulsearc_core::{Collector, PhoneValidator};
use pulsearc_domain::constants::SOURCE_WEB_SCRAPER;
use pulsearc_domain::{BusinessData, BusinessMetadata, BusinessUpdate, CollectorError};
use reqwest::Method;
use tracing::{instrument, warn};

use crate::http::HttpClient;

/// Fetches `business_uri` directly and extracts phone numbers from the
/// response body. Never fails the whole batch — a site being unreachable is
/// recorded as `website_live: false` rather than an error.
pub struct WebScraperCollector {
    http: HttpClient,
    phone_validator: Arc<dyn PhoneValidator>,
}

impl WebScraperCollector {
    pub fn new(http: HttpClient, phone_validator: Arc<dyn PhoneValidator>) -> Self {
        Self { http, phone_validator }
    }

    async fn fetch_one(&self, business: &BusinessMetadata) -> BusinessData {
        let response = self.http.send(self.http.request(Method::GET, &business.business_uri)).await;

        let body = match response {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(business_id = %business.business_id, error = %e, "failed to read response body");
                    return site_down();
                }
            },
            Ok(resp) => {
                warn!(business_id = %business.business_id, status = %resp.status(), "non-200 from business site");
                return site_down();
            }
            Err(e) => {
                warn!(business_id = %business.business_id, error = %e, "transport error fetching business site");
                return site_down();
            }
        };

        let phones = phone::extract(&body);
        if !phones.is_empty() {
            match self.phone_validator.validate("US", &phones).await {
                Ok(result) if !result.invalid.is_empty() => {
                    warn!(business_id = %business.business_id, invalid = ?result.invalid, "phone validator flagged numbers; keeping all extracted numbers");
                }
                Err(e) => {
                    warn!(business_id = %business.business_id, error = %e, "phone validation call failed, proceeding with extracted numbers");
                }
                _ => {}
            }
        }

        BusinessData {
            source: SOURCE_WEB_SCRAPER.to_string(),
            website_live: true,
            business_open: true,
            business_phones: phones,
        }
    }
}

fn site_down() -> BusinessData {
    BusinessData {
        source: SOURCE_WEB_SCRAPER.to_string(),
        website_live: false,
        business_open: false,
        business_phones: Vec::new(),
    }
}

#[async_trait]
impl Collector for WebScraperCollector {
    fn name(&self) -> &str {
        SOURCE_WEB_SCRAPER
    }

    #[instrument(skip(self, businesses), fields(count = businesses.len()))]
    async fn collect(
        &self,
        businesses: &[BusinessMetadata],
    ) -> Result<Vec<BusinessUpdate>, CollectorError> {
        let mut updates = Vec::with_capacity(businesses.len());
        for business in businesses {
            let data = self.fetch_one(business).await;
            updates.push(BusinessUpdate { metadata: business.clone(), data });
        }
        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pulsearc_core::PhoneValidationResult;
    use pulsearc_domain::PulseArcError;
    use uuid::Uuid;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    struct NoopValidator;

    #[async_trait]
    impl PhoneValidator for NoopValidator {
        async fn validate(
            &self,
            _country_code: &str,
            _numbers: &[String],
        ) -> Result<PhoneValidationResult, PulseArcError> {
            Ok(PhoneValidationResult::default())
        }
    }

    fn business(uri: String) -> BusinessMetadata {
        BusinessMetadata {
            business_id: Uuid::nil(),
            business_name: "Example Diner".into(),
            business_uri: uri,
            metadata: Default::default(),
        }
    }

    #[tokio::test]
    async fn live_site_extracts_phones() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Call us at 555-123-4567"))
            .mount(&server)
            .await;

        let http = HttpClient::builder().max_attempts(1).build().unwrap();
        let collector = WebScraperCollector::new(http, Arc::new(NoopValidator));
        let updates = collector.collect(&[business(server.uri())]).await.unwrap();

        assert_eq!(updates.len(), 1);
        assert!(updates[0].data.website_live);
        assert!(updates[0].data.business_open);
        assert_eq!(updates[0].data.business_phones, vec!["5551234567".to_string()]);
    }

    #[tokio::test]
    async fn non_200_reports_site_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(503)).mount(&server).await;

        let http = HttpClient::builder().max_attempts(1).build().unwrap();
        let collector = WebScraperCollector::new(http, Arc::new(NoopValidator));
        let updates = collector.collect(&[business(server.uri())]).await.unwrap();

        assert_eq!(updates.len(), 1);
        assert!(!updates[0].data.website_live);
        assert!(!updates[0].data.business_open);
        assert!(updates[0].data.business_phones.is_empty());
    }
}
