//! Test utilities for telemon-client
//!
//! Runs an axum router on an ephemeral port and hands back a client pinned to it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::EndpointConfig;
use crate::transport::HttpTransport;
use crate::{Result, TelemetryClient};

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: TelemetryClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Serve `router` and build a client whose endpoint is this server
    ///
    /// # Example
    ///
    /// ```ignore
    /// let router = axum::Router::new()
    ///     .route("/api/sensores", axum::routing::get(|| async { axum::Json(vec![0u8; 0]) }));
    /// let server = TestServer::start(router).await?;
    /// let sensors = server.client.list_sensors().await?;
    /// ```
    pub async fn start<S>(router: axum::Router<S>) -> Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        Self::start_with_timeout(router, Duration::from_secs(5), Duration::from_secs(2)).await
    }

    /// Same as [`TestServer::start`] with custom client timeouts
    pub async fn start_with_timeout<S>(
        router: axum::Router<S>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| crate::TelemetryError::network(e.to_string()))?;
        let addr = listener
            .local_addr()
            .map_err(|e| crate::TelemetryError::network(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let router: axum::Router = router.into();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        let endpoint = EndpointConfig::new(format!("http://{}", addr));
        let transport = HttpTransport::with_timeouts(timeout, connect_timeout)?;
        let client = TelemetryClient::with_transport(Arc::new(endpoint), Arc::new(transport));

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> &TelemetryClient {
        &self.client
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Address on loopback with nothing listening
pub fn unreachable_addr() -> SocketAddr {
    // Bind then release; the port stays free for the duration of a test
    match std::net::TcpListener::bind("127.0.0.1:0").and_then(|l| l.local_addr()) {
        Ok(addr) => addr,
        Err(_) => SocketAddr::from(([127, 0, 0, 1], 9)),
    }
}
