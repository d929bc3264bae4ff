//! Router assembly and the HTTP listener.

use crate::api;
use crate::shutdown::shutdown_signal;
use crate::state::AppState;
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// `/health` plus the payment API under `/api`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api::router())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// False until both LiqPay keys are set; checkouts fail until then.
    liqpay_configured: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        liqpay_configured: state.payment_builder.config().has_keys(),
    })
}

/// Serve `router` on `addr` until SIGINT/SIGTERM.
pub async fn run_server(router: Router, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(%local_addr, "Accepting LiqPay checkout traffic");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}
