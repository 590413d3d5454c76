//! HTTP server lifecycle.
//!
//! A `GenesisServer` is bound explicitly, serves until its `ShutdownHandle`
//! fires, then drains in-flight requests for at most the configured
//! shutdown timeout. Several servers can run side by side on ephemeral
//! ports.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::middleware::GatewayMetrics;
use crate::router::{build_router, AppState};
use axum::Router;
use gf_04_genesis_service::GenesisService;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, watch};
use tracing::{info, warn};

/// Requests shutdown of a running server. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    /// Stop accepting connections and start draining.
    pub fn shutdown(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.tx.borrow()
    }
}

pub struct GenesisServer {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
    shutdown_timeout: Duration,
    shutdown_tx: Arc<watch::Sender<bool>>,
    metrics: Arc<GatewayMetrics>,
}

impl GenesisServer {
    /// Validate the config and bind the listening socket.
    pub async fn bind(config: &GatewayConfig, service: GenesisService) -> Result<Self, GatewayError> {
        config.validate()?;

        let addr = config.addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| GatewayError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        let metrics = Arc::new(GatewayMetrics::new());
        let state = AppState {
            service,
            metrics: Arc::clone(&metrics),
        };
        let (shutdown_tx, _) = watch::channel(false);

        info!("[gf-05] listening on http://{}", local_addr);
        Ok(Self {
            listener,
            router: build_router(state, config.max_body_bytes),
            local_addr,
            shutdown_timeout: config.shutdown_timeout,
            shutdown_tx: Arc::new(shutdown_tx),
            metrics,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: Arc::clone(&self.shutdown_tx),
        }
    }

    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Serve until shutdown is requested and in-flight requests have
    /// finished, or the shutdown timeout has elapsed.
    pub async fn serve(self) -> Result<(), GatewayError> {
        let mut stop = self.shutdown_tx.subscribe();
        let (draining_tx, draining_rx) = oneshot::channel::<()>();

        let signal = async move {
            // A closed channel can not happen while `self` holds the sender.
            let _ = stop.wait_for(|stopped| *stopped).await;
            info!("[gf-05] shutdown requested, draining connections");
            let _ = draining_tx.send(());
        };

        let server = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .into_future();

        let timeout = self.shutdown_timeout;
        let deadline = async move {
            if draining_rx.await.is_err() {
                std::future::pending::<()>().await;
            }
            tokio::time::sleep(timeout).await;
        };

        tokio::select! {
            result = server => {
                result?;
                info!("[gf-05] server stopped");
            }
            _ = deadline => {
                warn!(
                    "[gf-05] shutdown timeout ({:?}) elapsed, dropping open connections",
                    timeout
                );
            }
        }
        Ok(())
    }
}
