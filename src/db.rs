//! Database connection management
//!
//! Builds the connection pool, verifies it, and bootstraps the schema.

pub mod queries;

use crate::config::{DatabaseConfig, SslMode};
use anyhow::Context;
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;
use tracing::{debug, info, warn};

/// Create a connection pool with the given configuration
pub fn create_pool(config: &DatabaseConfig) -> anyhow::Result<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(config.host.clone());
    cfg.port = Some(config.port);
    cfg.user = Some(config.user.clone());
    cfg.password = Some(config.password.clone());
    cfg.dbname = Some(config.database.clone());
    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });
    cfg.pool = Some(PoolConfig::new(config.max_pool_size));

    let pool = match config.ssl_mode {
        SslMode::Require => {
            let certs = rustls_native_certs::load_native_certs();
            for err in &certs.errors {
                warn!("Skipping unreadable native certificate: {}", err);
            }
            let mut root_store = rustls::RootCertStore::empty();
            for cert in certs.certs {
                root_store.add(cert).ok();
            }

            let tls_config = rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();

            let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);
            cfg.create_pool(Some(Runtime::Tokio1), tls)
                .context("Failed to create TLS pool")?
        }
        SslMode::Disable => cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .context("Failed to create pool")?,
    };

    debug!(
        "Pool configured for {}@{}:{}/{} (max {}, TLS: {:?})",
        config.user, config.host, config.port, config.database, config.max_pool_size, config.ssl_mode
    );
    Ok(pool)
}

/// Check out one connection and run a trivial query
pub async fn verify(pool: &Pool) -> anyhow::Result<()> {
    let client = pool
        .get()
        .await
        .context("Failed to get pool connection")?;

    client
        .query_one(queries::PING, &[])
        .await
        .context("Failed to verify database connection")?;

    info!("✅ Database connection successful");
    Ok(())
}

/// Create the users table if it doesn't exist
pub async fn ensure_schema(pool: &Pool) -> anyhow::Result<()> {
    let client = pool.get().await?;
    client.batch_execute(queries::CREATE_USERS_TABLE).await?;

    info!("✅ Database tables initialized");
    Ok(())
}
