use std::net::SocketAddr;

use axum::{Json, extract::ConnectInfo, http::StatusCode, response::IntoResponse};
use http_contracts::{error::ErrorResponse, message::MessageResponse};
use serde_json::json;
use tracing::{debug, instrument};

#[instrument(name = "root_handler", skip_all)]
pub async fn root_handler(
    cargo_pkg_name: &'static str,
    cargo_pkg_version: &'static str,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    debug!(%addr, "root requested");
    Json(json!({
        "service": cargo_pkg_name,
        "version": cargo_pkg_version,
        "status": "ok"
    }))
}

#[instrument(name = "health_handler", skip_all)]
pub async fn health_handler() -> impl IntoResponse {
    MessageResponse::new("healthy")
}

#[instrument(name = "ready_handler", skip_all)]
pub async fn ready_handler() -> impl IntoResponse {
    MessageResponse::new("ready")
}

#[instrument(name = "not_found_handler", skip_all, fields(addr = %addr))]
pub async fn not_found_handler(ConnectInfo(addr): ConnectInfo<SocketAddr>) -> impl IntoResponse {
    debug!(%addr, "no route matched");
    ErrorResponse::new("nothing to see here").with_status(StatusCode::NOT_FOUND)
}
