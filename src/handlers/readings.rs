//! Reading ingest handlers
//!
//! The request body is the event. `/readings` maps the pipeline status onto
//! the HTTP status; `/invoke` always answers 200 with the
//! `{statusCode, body}` envelope for function-style callers.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::alert::Notifier;
use crate::models::Response;
use crate::scoring::ScoringClient;
use crate::store::ReadingStore;
use crate::AppState;

/// Ingest one reading
pub async fn ingest<S, C, N>(State(state): State<AppState<S, C, N>>, body: String) -> Response
where
    S: ReadingStore + 'static,
    C: ScoringClient + 'static,
    N: Notifier + 'static,
{
    state.pipeline.run_raw(&body, Utc::now()).await
}

/// Ingest one reading, answering with the invocation envelope
pub async fn invoke<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    body: String,
) -> Json<Response>
where
    S: ReadingStore + 'static,
    C: ScoringClient + 'static,
    N: Notifier + 'static,
{
    Json(state.pipeline.run_raw(&body, Utc::now()).await)
}
