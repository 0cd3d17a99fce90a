//! Scoring collaborator
//!
//! The remote model is opaque: it takes one CSV row and answers with
//! `{ "scores": [ { "score": <number> }, ... ] }`. Only the first score of
//! the first item is used.

mod client;

use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::features::FeatureVector;

pub use client::HttpScoringClient;

/// Content type of the request body sent to the model.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("undecodable response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response has no score")]
    MissingScore,
}

/// Score plus the payload it was read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub raw: Value,
}

impl ScoreResult {
    /// Extract the first score of the first scored item.
    pub fn from_response(raw: Value) -> Result<Self, ScoringError> {
        let score = raw
            .get("scores")
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .and_then(|item| item.get("score"))
            .and_then(Value::as_f64)
            .ok_or(ScoringError::MissingScore)?;

        Ok(Self { score, raw })
    }

    pub fn from_body(body: &[u8]) -> Result<Self, ScoringError> {
        let raw: Value = serde_json::from_slice(body)?;
        Self::from_response(raw)
    }
}

/// Remote anomaly model.
pub trait ScoringClient: Send + Sync {
    /// Score one vector. Called exactly once per pipeline run.
    fn invoke(
        &self,
        vector: &FeatureVector,
    ) -> impl Future<Output = Result<ScoreResult, ScoringError>> + Send;
}
