//! Alert policy
//!
//! Fixed threshold, strict comparison: a score equal to the threshold is
//! not an anomaly.

use serde::{Deserialize, Serialize};

use crate::models::Reading;

/// Threshold used when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 1.3;

/// Subject line of every alert.
pub const ALERT_SUBJECT: &str = "Anomaly alert in environmental data";

/// Outcome of comparing a score against the threshold.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertDecision {
    NoAlert,
    Alert { message: String },
}

impl AlertDecision {
    pub fn should_alert(&self) -> bool {
        matches!(self, AlertDecision::Alert { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            AlertDecision::Alert { message } => Some(message.as_str()),
            AlertDecision::NoAlert => None,
        }
    }
}

/// Decide whether `score` warrants an alert. Pure; dispatch is up to the caller.
pub fn decide(score: f64, threshold: f64, reading: &Reading) -> AlertDecision {
    if score > threshold {
        AlertDecision::Alert {
            message: format_message(score, threshold, reading),
        }
    } else {
        AlertDecision::NoAlert
    }
}

fn format_message(score: f64, threshold: f64, reading: &Reading) -> String {
    let details = serde_json::to_string_pretty(reading)
        .unwrap_or_else(|_| format!("{:#?}", reading));

    format!(
        "🚨 Anomaly detected 🚨\n\n\
         Anomaly score: {:.4}\n\
         Configured threshold: {}\n\n\
         Sensor data:\n{}",
        score, threshold, details
    )
}

/// Threshold configuration for a deployment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AlertPolicy {
    pub threshold: f64,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl AlertPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn evaluate(&self, score: f64, reading: &Reading) -> AlertDecision {
        decide(score, self.threshold, reading)
    }
}
