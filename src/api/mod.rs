//! HTTP ingest and query endpoints
//!
//! - `POST /event` takes a [`LocationEvent`](crate::domain::LocationEvent)
//! - `GET /vehicle/{id}` returns the vehicle's last known status
//! - `GET /health`

pub mod error;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::engine::{GeofenceEngine, TransitionSink};

pub use error::ApiError;
pub use routes::router;

/// Shared handler state; clones share the engine and sink
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<GeofenceEngine>,
    pub sink: Arc<dyn TransitionSink>,
}

impl AppState {
    pub fn new(engine: GeofenceEngine, sink: Arc<dyn TransitionSink>) -> Self {
        Self {
            engine: Arc::new(engine),
            sink,
        }
    }
}

/// Serve the API on `addr` until Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        zones = state.engine.zones().len(),
        "geofence service listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
