//! API server entry point.

use std::sync::Arc;

use aggregator::ClientBuildError;
use api::Backends;
use api::config::{Config, ConfigError, LogFormat};
use metrics_exporter_prometheus::BuildError;
use store::{PostgresStore, StoreError};
use thiserror::Error;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to install Prometheus recorder: {0}")]
    Metrics(#[from] BuildError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    OrderClient(#[from] ClientBuildError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn connect_backends(config: &Config) -> Result<Backends, StoreError> {
    let Some(url) = &config.database_url else {
        tracing::info!("DATABASE_URL not set, using in-memory stores");
        return Ok(Backends::in_memory());
    };

    let store = PostgresStore::connect(url).await?;
    store.run_migrations().await?;
    tracing::info!("connected to PostgreSQL and applied migrations");
    Ok(Backends::shared(Arc::new(store)))
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env()?;
    init_tracing(&config);
    tracing::info!(
        policy = %config.aggregation_policy,
        remote_orders = config.order_service_url.is_some(),
        "configuration loaded"
    );

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    // 3. Connect storage and build application state
    let backends = connect_backends(&config).await?;
    let state = api::create_state(&config, backends)?;

    // 4. Build the application
    let app = api::create_app(state, metrics_handle);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down gracefully");
    Ok(())
}
