//! Web server adapter.
//!
//! Axum server with an HTMX-driven page: changing the sector re-renders the
//! `#panel` fragment with a fresh ticker list, changing the ticker re-renders
//! the statistics and chart. A small JSON API exposes the same computations.

mod error;
mod handlers;
mod templates;

pub use error::{ErrorFormat, WebError, status_from_error};
pub use handlers::*;
pub use templates::*;

use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::domain::error::DashboardError;
use crate::domain::lookup::LookupTable;
use crate::ports::data_port::DataPort;
use crate::settings::DashboardSettings;

pub struct AppState {
    pub data_port: Arc<dyn DataPort + Send + Sync>,
    pub lookup: Arc<LookupTable>,
    pub dashboard: DashboardSettings,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/api/sectors", get(handlers::api_sectors))
        .route("/api/options", get(handlers::api_options))
        .route("/api/view", get(handlers::api_view))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), DashboardError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "dashboard listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
