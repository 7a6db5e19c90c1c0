//! Users API - JSON CRUD over a PostgreSQL `users` table
//!
//! Five handlers map `/users` verbs onto one parameterized statement each.
//! Configuration comes from the environment (or `.env`), see [`config`].

mod config;
mod db;
mod error;
mod models;
mod repository;
mod routes;
mod state;

use crate::config::Settings;
use crate::repository::PgUserRepository;
use crate::routes::{create_router, ROUTES};
use crate::state::AppState;
use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("🚀 Starting Users API...");

    let settings = Settings::load()?;
    info!("📋 Configuration loaded successfully");

    let pool = db::create_pool(&settings.database)?;
    db::verify(&pool)
        .await
        .context("Cannot start server without database connection")?;
    info!("✅ Database pool created successfully");

    // Startup continues: the table may exist under a role without DDL rights
    if let Err(e) = db::ensure_schema(&pool).await {
        warn!("⚠️  Warning creating tables: {}", e);
    }

    let state = Arc::new(AppState::new(Arc::new(PgUserRepository::new(pool))));
    let app = create_router(state, &settings);

    let addr = SocketAddr::from((settings.server.host, settings.server.port));
    info!("🌐 Server listening on http://{}", addr);
    info!("📚 API Endpoints:");
    for (method, path) in ROUTES {
        info!("   {:<6} {}", method, path);
    }

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,users_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
