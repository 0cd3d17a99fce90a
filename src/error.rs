//! Error handling

use thiserror::Error;

use crate::alert::NotifyError;
use crate::scoring::ScoringError;
use crate::store::StoreError;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Every way a single pipeline run can fail.
#[derive(Debug, Error)]
pub enum PipelineError {
    // Input errors
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Invalid reading: {0}")]
    Validation(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    // Collaborator errors
    #[error("Failed to persist reading: {0}")]
    Persistence(#[from] StoreError),

    #[error("Scoring service error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Failed to publish alert: {0}")]
    Notification(#[from] NotifyError),
}

impl PipelineError {
    /// Status code reported for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::MissingFields(_)
            | PipelineError::Validation(_)
            | PipelineError::MalformedPayload(_) => 400,
            PipelineError::Persistence(_)
            | PipelineError::Scoring(_)
            | PipelineError::Notification(_) => 500,
        }
    }

    /// Short machine-readable name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::MissingFields(_) | PipelineError::Validation(_) => "validation",
            PipelineError::MalformedPayload(_) => "malformed_payload",
            PipelineError::Persistence(_) => "persistence",
            PipelineError::Scoring(_) => "scoring_service",
            PipelineError::Notification(_) => "notification",
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() == 400
    }
}
