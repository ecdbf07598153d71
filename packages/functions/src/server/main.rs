// Main entry point for the functions server

use anyhow::{Context, Result};
use functions_core::domains::email::SiteConfig;
use functions_core::domains::users::gate_for;
use functions_core::kernel::ServerDeps;
use functions_core::{server::build_app, Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,functions_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting moderation email functions");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        site_url = %config.site_url,
        beta_only = config.moderation_emails_beta_only,
        "Configuration loaded"
    );

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let deps = ServerDeps::postgres(
        pool.clone(),
        SiteConfig::new(config.site_url.clone()),
        gate_for(config.moderation_emails_beta_only),
    );
    let app = build_app(pool, deps);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Moderation trigger: http://localhost:{}/triggers/moderation", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
