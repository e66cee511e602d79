// Business Directory - Web Server

use anyhow::{Context, Result};
use business_directory::{build_router, logging, open_pool, setup_database, BusinessDirectory, Config};

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = Config::load();

    tracing::info!(version = business_directory::VERSION, "starting business directory");

    // Open database; failure here is fatal
    let pool = open_pool(&config.database, config.pool_size, config.connect_timeout())?;
    {
        let conn = pool.get().context("Failed to get a connection for schema setup")?;
        setup_database(&conn)?;
    }
    tracing::info!(database = ?config.database, pool_size = config.pool_size, "database opened");

    let app = build_router(BusinessDirectory::new(pool));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
