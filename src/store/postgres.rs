//! PostgreSQL reading store

use sqlx::PgPool;

use super::{ReadingStore, StoreError, StoredReading};

#[derive(Debug, Clone)]
pub struct PgReadingStore {
    pool: PgPool,
    insert_sql: String,
}

impl PgReadingStore {
    /// `table` must already be a validated SQL identifier.
    pub fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            insert_sql: insert_sql(table),
        }
    }
}

impl ReadingStore for PgReadingStore {
    async fn put(&self, record: &StoredReading) -> Result<(), StoreError> {
        let result = sqlx::query(&self.insert_sql)
            .bind(&record.timestamp)
            .bind(record.temperature)
            .bind(record.humidity)
            .bind(record.air_quality)
            .bind(&record.air_state)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() != 1 {
            return Err(StoreError::Rejected(format!(
                "expected 1 row written, got {}",
                result.rows_affected()
            )));
        }

        tracing::debug!("Reading {} written", record.timestamp);
        Ok(())
    }
}

fn insert_sql(table: &str) -> String {
    format!(
        r#"
        INSERT INTO {} (timestamp, temperature, humidity, air_quality, air_state)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (timestamp) DO UPDATE SET
            temperature = EXCLUDED.temperature,
            humidity = EXCLUDED.humidity,
            air_quality = EXCLUDED.air_quality,
            air_state = EXCLUDED.air_state,
            received_at = NOW()
        "#,
        table
    )
}
