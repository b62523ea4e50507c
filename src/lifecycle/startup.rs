//! Startup orchestration.
//!
//! # Responsibilities
//! - Install the metrics recorder and its upkeep task
//! - Bind the listener for the chosen service
//! - Serve until the caller's shutdown receiver fires
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener binds last (traffic only when telemetry is ready)

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::observability::process::ProcessCollector;
use crate::service::ServiceKind;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to install metrics recorder: {0}")]
    Metrics(#[from] BuildError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run `kind` with `config` until `shutdown` fires.
///
/// Subscribe before wiring up any trigger so that an early trigger is not
/// lost.
pub async fn start(
    kind: ServiceKind,
    config: ServiceConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    let (handle, upkeep) = if config.observability.metrics_enabled {
        let handle = metrics::install_recorder()?;
        let upkeep = metrics::spawn_upkeep(handle.clone(), ProcessCollector::new());
        tracing::info!("Prometheus recorder installed");
        (Some(handle), Some(upkeep))
    } else {
        (None, None)
    };

    let address = config.bind_address(kind);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!(
        service = %kind,
        address = %address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        metrics_enabled = config.observability.metrics_enabled,
        "Service configured"
    );

    let result = HttpServer::new(kind, &config, handle)
        .run(listener, shutdown)
        .await;

    if let Some(upkeep) = upkeep {
        upkeep.abort();
    }
    result?;

    tracing::info!(service = %kind, "Shutdown complete");
    Ok(())
}
