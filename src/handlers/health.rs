//! Health check handler

use axum::Json;
use serde::Serialize;

use crate::features::LayoutInfo;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    feature_layout: LayoutInfo,
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        feature_layout: LayoutInfo::current(),
    })
}
