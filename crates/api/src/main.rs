use anyhow::Result;
use tracing::info;

use hivesense_api::{app, config, middleware, services};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;
    middleware::logging::init_logging(&config.logging);

    info!("Starting HiveSense core v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&config.database).await?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    // The listener runs for the process lifetime; its handle is not awaited.
    let _telemetry = services::telemetry::spawn(config.mqtt.clone(), pool.clone());

    let app = app::create_app(config.clone(), pool);

    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
