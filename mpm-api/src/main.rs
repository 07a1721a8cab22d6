//! mpm-api - Music prompt manager HTTP service
//!
//! Stores music generation prompts with quality scores and the audio
//! outputs generated from them.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use mpm_api::{build_router, AppState};
use mpm_common::config::{find_config_file, load_toml_config, Overrides, Settings, TomlConfig};
use mpm_common::db::{init_database, seed_sample_data};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "mpm-api")]
#[command(about = "Music prompt manager API")]
#[command(version)]
struct Args {
    /// Folder holding mpm.db (also MPM_DATA_FOLDER)
    #[arg(short, long)]
    data_folder: Option<String>,

    /// Address to bind
    #[arg(long, env = "MPM_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "MPM_PORT")]
    port: Option<u16>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "MPM_LOG_LEVEL")]
    log_level: Option<String>,

    /// Load sample prompts into an empty database
    #[arg(long, env = "MPM_SEED")]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config file is read before tracing so its log level can apply
    let config_file = find_config_file();
    let (toml, config_error) = match config_file.as_deref().map(load_toml_config) {
        Some(Ok(config)) => (config, None),
        Some(Err(e)) => (TomlConfig::default(), Some(e)),
        None => (TomlConfig::default(), None),
    };

    let settings = Settings::resolve(
        &Overrides {
            data_folder: args.data_folder,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
        },
        &toml,
    );

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .init();

    info!(
        "Starting MPM API (mpm-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match (&config_file, config_error) {
        (_, Some(e)) => warn!("Ignoring config file, using defaults: {}", e),
        (Some(path), None) => info!("Config file: {}", path.display()),
        (None, None) => warn!("No config file found, using defaults"),
    }

    let db_path = settings.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    if args.seed {
        let inserted = seed_sample_data(&pool)
            .await
            .context("Failed to load sample data")?;
        info!(inserted, "Sample data step complete");
    }

    let app = build_router(AppState::new(pool.clone()));

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("mpm-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
