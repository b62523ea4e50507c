//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the health, service and scrape endpoints
//! - Wire up middleware (request ID, tracing, timeout, body limit, panics)
//! - Count API requests by matched route
//! - Bind server to listener and shut down gracefully

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::health;
use crate::http::middleware::track_requests;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::{json_error_bodies, panic_response};
use crate::http::{quote, recommendation};
use crate::recommendation::Catalog;
use crate::service::ServiceKind;

/// HTTP server for one storefront service.
pub struct HttpServer {
    router: Router,
    kind: ServiceKind,
}

impl HttpServer {
    /// Create a server for `kind`.
    ///
    /// `/metrics` is mounted only when a Prometheus handle is given.
    pub fn new(kind: ServiceKind, config: &ServiceConfig, metrics: Option<PrometheusHandle>) -> Self {
        let router = Self::build_router(kind, config, metrics);
        Self { router, kind }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(
        kind: ServiceKind,
        config: &ServiceConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Router {
        let api = match kind {
            ServiceKind::Quote => quote::routes(),
            ServiceKind::Recommendation => recommendation::routes(Catalog::builtin()),
        }
        .route_layer(middleware::from_fn(track_requests));

        let mut router = Router::new()
            .route("/health", get(health::health))
            .merge(api);

        if let Some(handle) = metrics {
            router = router.route("/metrics", get(move || std::future::ready(handle.render())));
        }

        router
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn(json_error_bodies))
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once `shutdown` fires (or its sender is dropped) and in-flight
    /// requests have drained. OS signals reach it through
    /// [`Shutdown::trigger_on_signal`](crate::lifecycle::Shutdown::trigger_on_signal).
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            service = %self.kind,
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown requested");
            })
            .await?;

        tracing::info!(service = %self.kind, "HTTP server stopped");
        Ok(())
    }
}
