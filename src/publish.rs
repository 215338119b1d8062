use crate::error::PublishError;
use crate::providers::sanitize_error_body;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::info;

/// Thin wrapper over the page-feed HTTP surface: one multipart photo upload
/// and one token health probe. Failure handling (kill switch, state freeze)
/// belongs to the orchestrator.
pub struct PageFeedClient {
    client: Client,
    base_url: String,
    access_token: String,
    page_id: String,
}

impl PageFeedClient {
    pub fn new(base_url: &str, access_token: &str, page_id: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            page_id: page_id.to_string(),
        }
    }

    /// Lightweight authenticated GET; anything but 2xx means the token is no
    /// longer good and posting must stop until a human looks.
    pub async fn check_token(&self) -> Result<(), PublishError> {
        let url = format!(
            "{}/me?access_token={}",
            self.base_url, self.access_token
        );
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PublishError::Probe(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(PublishError::Probe(format!(
                "{status}: {}",
                sanitize_error_body(&body)
            )))
        }
    }

    /// Multipart photo upload to the page feed.
    pub async fn publish(
        &self,
        image: Vec<u8>,
        caption: Option<&str>,
    ) -> Result<(), PublishError> {
        let part = Part::bytes(image)
            .file_name("image.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        let mut form = Form::new()
            .text("access_token", self.access_token.clone())
            .text("published", "true");
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }
        let form = form.part("source", part);

        let response = self
            .client
            .post(format!("{}/{}/photos", self.base_url, self.page_id))
            .multipart(form)
            .send()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!(page = %self.page_id, "photo published");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(PublishError::Rejected {
                status: status.as_u16(),
                body: sanitize_error_body(&body),
            })
        }
    }
}
