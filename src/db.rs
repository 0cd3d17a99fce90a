//! Database module - PostgreSQL connection and migrations

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Create database connection pool
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool, table: &str) -> Result<(), sqlx::Error> {
    sqlx::query(&schema_sql(table))
        .execute(pool)
        .await?;

    tracing::info!("Database schema applied successfully ({})", table);
    Ok(())
}

/// Readings table, keyed by the device timestamp
fn schema_sql(table: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {table} (
    timestamp TEXT PRIMARY KEY,
    temperature NUMERIC NOT NULL,
    humidity NUMERIC NOT NULL,
    air_quality BIGINT NOT NULL,
    air_state TEXT NOT NULL,
    received_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#
    )
}
