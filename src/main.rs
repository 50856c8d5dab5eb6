use std::sync::Arc;

use tracing::info;

use media_catalog::adapters::{
    HandlerRegistry, InProcessEventPublisher, LocalFileStorage, RedisMessageProducer,
    SendToEncoderHandler,
};
use media_catalog::config::AppConfig;
use media_catalog::domain::EventKind;
use media_catalog::state::AppState;
use media_catalog::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // --- Configuration ---
    let config = AppConfig::load()?;
    config.validate()?;

    // --- Tracing ---
    telemetry::init_tracing(&config.runtime);
    info!(
        environment = ?config.runtime.environment,
        "Loaded media catalog configuration"
    );

    // --- Database ---
    let pool = config.database.connect().await?;
    info!(
        max_connections = config.database.max_connections,
        "Database connection pool created"
    );

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    // --- Messaging ---
    let client = redis::Client::open(config.redis.url.as_str())?;
    let conn = tokio::time::timeout(
        config.redis.timeout(),
        client.get_multiplexed_async_connection(),
    )
    .await??;
    let producer = Arc::new(RedisMessageProducer::new(
        conn,
        config.redis.encoder_channel.clone(),
    ));
    info!(channel = %producer.channel(), "Encoder queue connected");

    // --- Event handlers ---
    let registry = HandlerRegistry::new().with(
        EventKind::VideoMediaUploaded,
        Arc::new(SendToEncoderHandler::new(producer)),
    );
    info!(handlers = registry.len(), "Event handler registry built");

    // --- Storage ---
    let storage = LocalFileStorage::new(config.storage.base_path.clone());
    info!(base_path = %config.storage.base_path.display(), "Media storage ready");

    // --- App state ---
    let state = AppState::new(
        pool,
        Arc::new(InProcessEventPublisher::new(registry)),
        Arc::new(storage),
    );

    info!("Media catalog ready; press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    state.pool.close().await;
    Ok(())
}
