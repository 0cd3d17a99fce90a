//! Pipeline - one event in, exactly one response out
//!
//! ```text
//! Received → Validated → Persisted → Encoded → Scored → Decided → Responded
//!     │                     │                      │          │
//!     └─ RejectedInvalid    └──────── Failed ──────┴──────────┘
//! ```
//!
//! Collaborators are awaited strictly in sequence and never retried. The
//! reading is persisted before scoring, so a model failure never loses data,
//! while a store failure stops the run before the model is called.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::alert::{AlertDecision, AlertPolicy, Notifier, ALERT_SUBJECT};
use crate::error::{PipelineError, PipelineResult};
use crate::features::{self, FeatureVector};
use crate::models::{Reading, Response};
use crate::scoring::{ScoreResult, ScoringClient};
use crate::store::{ReadingStore, StoredReading};

/// Last stage a run completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validated,
    Persisted,
    Encoded,
    Scored,
    Decided,
    Responded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Validated => "validated",
            Stage::Persisted => "persisted",
            Stage::Encoded => "encoded",
            Stage::Scored => "scored",
            Stage::Decided => "decided",
            Stage::Responded => "responded",
        };
        f.write_str(name)
    }
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub reading: Reading,
    pub vector: FeatureVector,
    pub score: ScoreResult,
    pub decision: AlertDecision,
}

pub struct Pipeline<S, C, N> {
    store: S,
    scorer: C,
    notifier: N,
    policy: AlertPolicy,
    topic: String,
}

impl<S, C, N> Pipeline<S, C, N>
where
    S: ReadingStore,
    C: ScoringClient,
    N: Notifier,
{
    pub fn new(store: S, scorer: C, notifier: N, policy: AlertPolicy, topic: impl Into<String>) -> Self {
        Self {
            store,
            scorer,
            notifier,
            policy,
            topic: topic.into(),
        }
    }

    /// Run one event evaluated at `now` and convert the outcome into a response.
    pub async fn run(&self, event: &Value, now: DateTime<Utc>) -> Response {
        match self.process(event, now).await {
            Ok(outcome) => Response::scored(outcome.score.score),
            Err(e) => Response::failed(&e),
        }
    }

    /// Run an event that arrived as raw text.
    pub async fn run_raw(&self, body: &str, now: DateTime<Utc>) -> Response {
        match serde_json::from_str::<Value>(body) {
            Ok(event) => self.run(&event, now).await,
            Err(e) => {
                let error = PipelineError::from(e);
                tracing::warn!(kind = error.kind(), "Rejected event: {}", error);
                Response::failed(&error)
            }
        }
    }

    /// Run one event and keep the intermediate results.
    pub async fn process(&self, event: &Value, now: DateTime<Utc>) -> PipelineResult<RunOutcome> {
        let invocation_id = Uuid::new_v4();
        let span = tracing::info_span!("pipeline", %invocation_id);

        async move {
            let mut stage = Stage::Received;
            let result = self.execute(event, now, &mut stage).await;

            match &result {
                Ok(outcome) => {
                    tracing::debug!(stage = %Stage::Responded, "Run complete, score {}", outcome.score.score);
                }
                Err(e) if e.is_client_error() => {
                    tracing::warn!(stage = %stage, kind = e.kind(), "Rejected event: {}", e);
                }
                Err(e) => {
                    tracing::error!(stage = %stage, kind = e.kind(), "Pipeline failed: {}", e);
                }
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn execute(
        &self,
        event: &Value,
        now: DateTime<Utc>,
        stage: &mut Stage,
    ) -> PipelineResult<RunOutcome> {
        tracing::info!("Event received: {}", event);

        let reading = Reading::from_event(event)?;
        *stage = Stage::Validated;

        self.store.put(&StoredReading::from(&reading)).await?;
        *stage = Stage::Persisted;
        tracing::info!("Reading {} persisted", reading.timestamp);

        let vector = features::encode(&reading, &now);
        *stage = Stage::Encoded;
        tracing::info!(features = %vector.to_log_entry(), "Feature vector: {}", vector.to_csv());

        let score = self.scorer.invoke(&vector).await?;
        *stage = Stage::Scored;
        tracing::info!("Anomaly score received: {}", score.score);

        let decision = self.policy.evaluate(score.score, &reading);
        *stage = Stage::Decided;

        if let AlertDecision::Alert { message } = &decision {
            tracing::warn!(
                "Anomaly detected! Score {} > threshold {}",
                score.score,
                self.policy.threshold
            );
            self.notifier.publish(&self.topic, ALERT_SUBJECT, message).await?;
        }

        Ok(RunOutcome {
            reading,
            vector,
            score,
            decision,
        })
    }
}
