//! HTTP-backed `PhoneValidator` against the utils service. Advisory only —
//! its output is logged but never filters the extracted phone set (§9).

use async_trait::async_trait;
use pulsearc_core::{PhoneValidationResult, PhoneValidator};
use pulsearc_domain::PulseArcError;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::map_status_error;
use crate::http::HttpClient;

#[derive(Debug, Serialize)]
struct ValidateRequest<'a> {
    country_code: &'a str,
    numbers: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ValidateEnvelope {
    data: PhoneValidationData,
}

#[derive(Debug, Deserialize)]
struct PhoneValidationData {
    #[serde(default)]
    valid: Vec<String>,
    #[serde(default)]
    invalid: Vec<String>,
}

pub struct HttpPhoneValidator {
    http: HttpClient,
    base_url: String,
}

impl HttpPhoneValidator {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into() }
    }
}

#[async_trait]
impl PhoneValidator for HttpPhoneValidator {
    #[instrument(skip(self, numbers), fields(count = numbers.len()))]
    async fn validate(
        &self,
        country_code: &str,
        numbers: &[String],
    ) -> Result<PhoneValidationResult, PulseArcError> {
        if numbers.is_empty() {
            return Ok(PhoneValidationResult::default());
        }

        let url = format!("{}/validate", self.base_url);
        let request = ValidateRequest { country_code, numbers };
        let response = self.http.send(self.http.request(Method::POST, &url).json(&request)).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error("validate phones", status, &body));
        }

        let envelope: ValidateEnvelope = response
            .json()
            .await
            .map_err(|e| PulseArcError::InvalidInput(format!("malformed validation response: {e}")))?;

        Ok(PhoneValidationResult { valid: envelope.data.valid, invalid: envelope.data.invalid })
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
    async fn parses_valid_and_invalid_lists() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/validate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"valid": ["5551234567"], "invalid": ["123"]}
            })))
            .mount(&server)
            .await;

        let validator = HttpPhoneValidator::new(client(), server.uri());
        let result = validator
            .validate("US", &["5551234567".to_string(), "123".to_string()])
            .await
            .expect("validation result");
        assert_eq!(result.valid, vec!["5551234567".to_string()]);
        assert_eq!(result.invalid, vec!["123".to_string()]);
    }

    #[tokio::test]
    async fn skips_call_for_empty_input() {
        let validator = HttpPhoneValidator::new(client(), "http://127.0.0.1:1".to_string());
        let result = validator.validate("US", &[]).await.expect("no call made");
        assert!(result.valid.is_empty() && result.invalid.is_empty());
    }
}
