//! In-memory collaborators shared by the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};

use airsense_anomaly::alert::{AlertPolicy, Notifier, NotifyError};
use airsense_anomaly::features::FeatureVector;
use airsense_anomaly::scoring::{ScoreResult, ScoringClient, ScoringError};
use airsense_anomaly::store::{ReadingStore, StoreError, StoredReading};
use airsense_anomaly::Pipeline;

pub const TOPIC: &str = "air-quality-alerts";

#[derive(Clone, Default)]
pub struct MemoryStore {
    pub attempts: Arc<Mutex<usize>>,
    pub records: Arc<Mutex<Vec<StoredReading>>>,
    pub fail: bool,
}

impl ReadingStore for MemoryStore {
    async fn put(&self, record: &StoredReading) -> Result<(), StoreError> {
        *self.attempts.lock() += 1;
        if self.fail {
            return Err(StoreError::Rejected("store unavailable".to_string()));
        }
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Answers every call with `score`, or fails when `score` is None.
#[derive(Clone, Default)]
pub struct FixedScorer {
    pub score: Option<f64>,
    pub vectors: Arc<Mutex<Vec<FeatureVector>>>,
}

impl ScoringClient for FixedScorer {
    async fn invoke(&self, vector: &FeatureVector) -> Result<ScoreResult, ScoringError> {
        self.vectors.lock().push(vector.clone());
        match self.score {
            Some(score) => ScoreResult::from_response(json!({ "scores": [ { "score": score } ] })),
            None => Err(ScoringError::Status {
                status: 503,
                body: "model unavailable".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub topic: String,
    pub subject: String,
    pub message: String,
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub published: Arc<Mutex<Vec<Published>>>,
    pub fail: bool,
}

impl Notifier for RecordingNotifier {
    async fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<(), NotifyError> {
        self.published.lock().push(Published {
            topic: topic.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        });
        if self.fail {
            return Err(NotifyError::Status {
                status: 500,
                body: "sink down".to_string(),
            });
        }
        Ok(())
    }
}

pub struct Harness {
    pub store: MemoryStore,
    pub scorer: FixedScorer,
    pub notifier: RecordingNotifier,
}

impl Harness {
    pub fn new(score: Option<f64>) -> Self {
        Self {
            store: MemoryStore::default(),
            scorer: FixedScorer {
                score,
                ..Default::default()
            },
            notifier: RecordingNotifier::default(),
        }
    }

    pub fn pipeline(&self) -> Pipeline<MemoryStore, FixedScorer, RecordingNotifier> {
        Pipeline::new(
            self.store.clone(),
            self.scorer.clone(),
            self.notifier.clone(),
            AlertPolicy::new(1.3),
            TOPIC,
        )
    }

    pub fn store_attempts(&self) -> usize {
        *self.store.attempts.lock()
    }

    pub fn score_calls(&self) -> usize {
        self.scorer.vectors.lock().len()
    }

    pub fn publish_calls(&self) -> usize {
        self.notifier.published.lock().len()
    }
}

pub fn sample_payload() -> Value {
    json!({
        "timestamp": "2024-01-01T00:00:00",
        "temperature": 21.5,
        "humidity": 40.2,
        "air_quality": 150,
        "air_state": "moderate"
    })
}
