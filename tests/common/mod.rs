//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;

use sdk_rust::StorefrontClient;
use storefront_services::{HttpServer, ServiceConfig, ServiceKind, Shutdown};
use tokio::net::TcpListener;

/// A service running on an ephemeral local port.
pub struct TestService {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestService {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> StorefrontClient {
        StorefrontClient::new(&self.url())
    }

    /// Trigger shutdown and wait for the server to drain.
    pub async fn stop(self) {
        self.shutdown.trigger();
        let result = tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked");
        result.expect("server returned an error");
    }
}

/// Start `kind` with default configuration on 127.0.0.1:0.
pub async fn start_service(kind: ServiceKind) -> TestService {
    start_service_with(kind, ServiceConfig::default()).await
}

#[allow(dead_code)]
pub async fn start_service_with(kind: ServiceKind, config: ServiceConfig) -> TestService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(kind, &config, None);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestService {
        addr,
        shutdown,
        handle,
    }
}
