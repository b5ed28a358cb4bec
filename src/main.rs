use anyhow::Context;
use clap::Parser;
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info};

use omdb_proxy::{
    Ctx, app,
    config::AppConfig,
    omdb::{HttpTransport, OmdbService, QueryBuilder},
    telemetry,
};

/// Typed proxy in front of the OMDb movie API
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML config file (default: ./omdb-proxy.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides the config file
    #[arg(long)]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = telemetry::init_tracing(args.log_json)?;

    let mut config = AppConfig::load(args.config.as_deref()).inspect_err(|e| {
        error!("{e}");
    })?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let transport = HttpTransport::new(&config.omdb_base_url, config.omdb_timeout)
        .context("failed to build OMDb HTTP client")?;
    let service = OmdbService::new(QueryBuilder::new(config.api_key.clone()), Arc::new(transport));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to create listener on {addr}"))?;

    info!("server listening at {addr}");
    axum::serve(listener, app(Ctx::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("failed to serve")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    #[cfg(not(unix))]
    ctrl_c.await;
}
