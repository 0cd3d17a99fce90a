//! Store collaborator
//!
//! One record per reading, keyed by timestamp. Writing the same timestamp
//! twice replaces the earlier record.

mod postgres;

use std::future::Future;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Reading;

pub use postgres::PgReadingStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("write rejected: {0}")]
    Rejected(String),
}

/// Record as written to the store. Numeric fields keep the decimal digits
/// they arrived with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReading {
    pub timestamp: String,
    pub temperature: Decimal,
    pub humidity: Decimal,
    pub air_quality: i64,
    pub air_state: String,
}

impl From<&Reading> for StoredReading {
    fn from(reading: &Reading) -> Self {
        Self {
            timestamp: reading.timestamp.clone(),
            temperature: reading.temperature,
            humidity: reading.humidity,
            air_quality: reading.air_quality,
            air_state: reading.air_state.clone(),
        }
    }
}

/// Durable record repository.
pub trait ReadingStore: Send + Sync {
    /// Write one record. Called exactly once per valid reading, before scoring.
    fn put(&self, record: &StoredReading) -> impl Future<Output = Result<(), StoreError>> + Send;
}
