//! Siteserve
//!
//! Serves each site's public uploaded files from a shared storage tree.

use anyhow::Context;
use clap::Parser;
use siteserve_rest::{ServerConfig, create_app_with_config, init_logging};
use siteserve_storage::{FileStore, LocalFileStore};
use tracing::{info, warn};

/// Starts the Axum HTTP server and runs until Ctrl-C or SIGTERM.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves when the process is asked to stop.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        storage_root = %config.storage_root.display(),
        files_prefix = %config.files_prefix,
        routing_mode = ?config.multitenancy.routing_mode,
        site = ?config.site,
        "Starting Siteserve"
    );

    let store = LocalFileStore::new();

    // Serving still works if the root appears later; readiness reports it.
    if store.metadata(&config.storage_root).await.is_err() {
        warn!(
            storage_root = %config.storage_root.display(),
            "Storage root is not accessible yet"
        );
    }

    let app = create_app_with_config(store, config.clone());
    serve(app, &config).await
}
