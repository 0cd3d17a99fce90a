//! AirSense anomaly service entry point

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

use airsense_anomaly::{
    alert::{AlertPolicy, WebhookNotifier},
    config::Config,
    create_router, db,
    features::{layout_hash, FEATURE_VERSION},
    scoring::HttpScoringClient,
    store::PgReadingStore,
    AppState, Pipeline,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    init_logging(&config);

    config.validate().context("Invalid configuration")?;

    tracing::info!("AirSense anomaly service starting...");
    tracing::info!("Database: {}", config.database_url.split('@').last().unwrap_or("***"));
    tracing::info!(
        "Scoring endpoint: {} (feature layout v{}, hash {:08x})",
        config.scoring_endpoint,
        FEATURE_VERSION,
        layout_hash()
    );
    tracing::info!("Anomaly threshold: {}", config.anomaly_threshold);

    // Initialize database pool
    let pool = db::create_pool(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    // Run migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool, &config.readings_table)
        .await
        .context("Failed to run migrations")?;

    // Build collaborators
    let store = PgReadingStore::new(pool, &config.readings_table);
    let scorer = HttpScoringClient::new(
        &config.scoring_url,
        &config.scoring_endpoint,
        config.http_timeout(),
    )
    .context("Failed to create scoring client")?;
    let notifier = WebhookNotifier::new(&config.notify_url, config.http_timeout())
        .context("Failed to create notification client")?;

    let pipeline = Pipeline::new(
        store,
        scorer,
        notifier,
        AlertPolicy::new(config.anomaly_threshold),
        config.notify_topic.clone(),
    );

    let app = create_router(AppState::new(pipeline));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_production() {
        "airsense_anomaly=info,tower_http=info"
    } else {
        "airsense_anomaly=debug,tower_http=debug"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
