use anyhow::Context;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use songs_api::db::Database;
use songs_api::secrets::SECRET_MANAGER;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::DEBUG.into()))
        .with_target(false)
        .init();

    // Initialize database
    let database = match Database::new().await {
        Ok(db) => {
            info!("📊 Connected to PostgreSQL database");
            db
        }
        Err(e) => {
            error!("❌ Failed to connect to database: {}", e);
            return Err(e).context("database connection required");
        }
    };

    // Run migrations
    if let Err(e) = database.migrate().await {
        error!("❌ Failed to run database migrations: {}", e);
        return Err(e).context("database migrations failed");
    }
    info!("📊 Database migrations completed");

    let port = SECRET_MANAGER.get("PORT");
    let backend_url = SECRET_MANAGER.get("BACKEND_URL");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;

    let app = songs_api::app(database);

    info!("🎵 Songs API listening on {}", backend_url);
    info!("📡 Endpoints: /songs /average_difficulty /search /rate /ratings/{{song_id}}");

    axum::serve(listener, app).await?;
    Ok(())
}
