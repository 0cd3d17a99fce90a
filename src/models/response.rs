//! Pipeline response model

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::PipelineError;

/// Exactly one of these is produced per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

impl Response {
    /// Successful run carrying the model score.
    pub fn scored(score: f64) -> Self {
        Self {
            status_code: 200,
            body: json!({ "anomaly_score": score }).to_string(),
        }
    }

    pub fn failed(error: &PipelineError) -> Self {
        Self {
            status_code: error.status_code(),
            body: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Score carried by a successful response.
    pub fn anomaly_score(&self) -> Option<f64> {
        if !self.is_success() {
            return None;
        }
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()?
            .get("anomaly_score")?
            .as_f64()
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_success() {
            return (status, [(header::CONTENT_TYPE, "application/json")], self.body)
                .into_response();
        }

        let body = axum::Json(json!({
            "error": self.body,
            "status": status.as_u16()
        }));
        (status, body).into_response()
    }
}
