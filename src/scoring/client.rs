//! HTTP scoring client

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use super::{ScoreResult, ScoringClient, ScoringError, CSV_CONTENT_TYPE};
use crate::features::FeatureVector;

/// Calls `POST {base_url}/endpoints/{endpoint}/invocations` with the vector as CSV.
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    base_url: String,
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpScoringClient {
    pub fn new(base_url: &str, endpoint: &str, timeout: Duration) -> Result<Self, ScoringError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoint: endpoint.to_string(),
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn invocation_url(&self) -> String {
        format!("{}/endpoints/{}/invocations", self.base_url, self.endpoint)
    }
}

impl ScoringClient for HttpScoringClient {
    async fn invoke(&self, vector: &FeatureVector) -> Result<ScoreResult, ScoringError> {
        let body = vector.to_csv();

        tracing::debug!("Invoking scoring endpoint {} with {}", self.endpoint, body);

        let response = self
            .http_client
            .post(self.invocation_url())
            .header(CONTENT_TYPE, CSV_CONTENT_TYPE)
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoringError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        ScoreResult::from_body(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_url() {
        let client = HttpScoringClient::new(
            "http://models.local:8080/",
            "air-quality-rcf",
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.invocation_url(),
            "http://models.local:8080/endpoints/air-quality-rcf/invocations"
        );
        assert_eq!(client.endpoint(), "air-quality-rcf");
    }
}
