//! AirSense anomaly service
//!
//! Ingests one environmental sensor reading per request, stores it, scores
//! it against a remote anomaly model and publishes an alert when the score
//! crosses the configured threshold.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    AIRSENSE ANOMALY                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  POST /api/v1/readings                                       │
//! │        │                                                     │
//! │        ▼                                                     │
//! │  ┌───────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//! │  │ Validate  │──▶│ Persist  │──▶│ Encode   │──▶│ Score    │  │
//! │  │ (Reading) │   │ (Store)  │   │ (layout) │   │ (model)  │  │
//! │  └───────────┘   └──────────┘   └──────────┘   └────┬─────┘  │
//! │                                                     ▼        │
//! │                                  ┌──────────┐   ┌──────────┐ │
//! │                                  │ Publish  │◀──│ Decide   │ │
//! │                                  │ (notify) │   │ (policy) │ │
//! │                                  └──────────┘   └──────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod alert;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod scoring;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::Pipeline;

use alert::Notifier;
use scoring::ScoringClient;
use store::ReadingStore;

/// Shared application state
pub struct AppState<S, C, N> {
    pub pipeline: Arc<Pipeline<S, C, N>>,
}

impl<S, C, N> AppState<S, C, N> {
    pub fn new(pipeline: Pipeline<S, C, N>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

impl<S, C, N> Clone for AppState<S, C, N> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

/// Create the main router with all routes
pub fn create_router<S, C, N>(state: AppState<S, C, N>) -> Router
where
    S: ReadingStore + 'static,
    C: ScoringClient + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/readings", post(handlers::readings::ingest::<S, C, N>))
        .route("/api/v1/invoke", post(handlers::readings::invoke::<S, C, N>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
