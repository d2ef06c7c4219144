use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use http_common::{router::base_routes, trace_layer::http_trace_layer};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::{config::Config, error::AppError, features, utilities::app_state::AppState};

pub async fn app(
    cargo_pkg_name: &'static str,
    cargo_pkg_version: &'static str,
    cfg: &Config,
) -> Result<Router, AppError> {
    let app_state = AppState::init(cfg).await?;

    Ok(router(
        cargo_pkg_name,
        cargo_pkg_version,
        app_state,
        &cfg.cors_origins,
    ))
}

pub fn router(
    cargo_pkg_name: &'static str,
    cargo_pkg_version: &'static str,
    app_state: AppState,
    cors_origins: &[String],
) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid cors origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_credentials(true)
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .merge(features::get_routes())
        .merge(base_routes(cargo_pkg_name, cargo_pkg_version))
        .with_state(app_state)
        .layer(http_trace_layer())
        .layer(cors)
}
