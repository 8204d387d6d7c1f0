//! HTTP client for the notifications REST API
//!
//! Covers the two calls the panel makes: listing notifications (with the
//! unread count) and marking everything read.

use crate::error::{PanelError, Result};
use crate::models::NotificationPage;
use async_trait::async_trait;
use reqwest::Client;

/// Seam between the panel and the backend API.
///
/// The panel only depends on this trait; tests substitute an in-memory
/// implementation.
#[async_trait]
pub trait NotificationsApi: Send + Sync {
    /// Fetch the notification list and unread count
    async fn fetch(&self, token: &str) -> Result<NotificationPage>;

    /// Mark every notification read
    async fn mark_all_read(&self, token: &str) -> Result<()>;
}

/// Production implementation over reqwest
pub struct HttpNotificationsApi {
    client: Client,
    base_url: String,
}

impl HttpNotificationsApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl NotificationsApi for HttpNotificationsApi {
    async fn fetch(&self, token: &str) -> Result<NotificationPage> {
        let response = self
            .client
            .get(self.url("/notifications"))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PanelError::UnexpectedResponse(format!(
                "status {}",
                response.status()
            )));
        }

        let page = response.json::<NotificationPage>().await?;
        if !page.success {
            return Err(PanelError::UnexpectedResponse(
                "success flag not set".to_string(),
            ));
        }
        Ok(page)
    }

    async fn mark_all_read(&self, token: &str) -> Result<()> {
        let response = self
            .client
            .patch(self.url("/notifications/mark-all-read"))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PanelError::UnexpectedResponse(format!(
                "status {}",
                response.status()
            )));
        }
        Ok(())
    }
}
