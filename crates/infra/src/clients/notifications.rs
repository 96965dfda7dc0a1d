//! HTTP-backed `NotificationClient`. A 409 (hash conflict) is the service's
//! way of saying "already recorded" and is treated as success (§4.8, §7.5).

use async_trait::async_trait;
use pulsearc_core::NotificationClient;
use pulsearc_domain::{Notification, PulseArcError};
use reqwest::{Method, StatusCode};
use tracing::{debug, instrument, warn};

use super::error::map_status_error;
use crate::http::HttpClient;

pub struct HttpNotificationClient {
    http: HttpClient,
    base_url: String,
}

impl HttpNotificationClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into() }
    }
}

#[async_trait]
impl NotificationClient for HttpNotificationClient {
    #[instrument(skip(self, notification), fields(business_id = %notification.business_id, hash = %notification.notification_hash))]
    async fn create(&self, notification: Notification) -> Result<(), PulseArcError> {
        let url = format!("{}/notifications/new", self.base_url);
        let response = self
            .http
            .send(self.http.request(Method::POST, &url).json(&notification))
            .await?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            debug!("notification already recorded, treating as success");
            return Ok(());
        }
        if status == StatusCode::CREATED || status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%status, "failed to create notification");
        Err(map_status_error("create notification", status, &body))
    }
}
