//! Notification collaborator
//!
//! `publish(topic, subject, message)` to an opaque sink. The bundled
//! implementation posts JSON to a webhook relay.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("sink returned status {status}: {body}")]
    Status { status: u16, body: String },
}

pub trait Notifier: Send + Sync {
    fn publish(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    topic: &'a str,
    subject: &'a str,
    message: &'a str,
}

#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    http_client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.to_string(),
            http_client,
        })
    }
}

impl Notifier for WebhookNotifier {
    async fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<(), NotifyError> {
        let request = PublishRequest {
            topic,
            subject,
            message,
        };

        let response = self
            .http_client
            .post(&self.url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Alert publish failed ({}): {}", status, body);
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!("Alert published to {}", topic);
        Ok(())
    }
}
