use axum::{Router, routing::get};

use crate::handlers::{health_handler, not_found_handler, ready_handler, root_handler};

pub fn base_routes<S>(cargo_pkg_name: &'static str, cargo_pkg_version: &'static str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(move |connect_info| root_handler(cargo_pkg_name, cargo_pkg_version, connect_info)),
        )
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .fallback(not_found_handler)
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::{
        body::Body,
        extract::connect_info::MockConnectInfo,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        base_routes("admins-api", "0.1.0").layer(MockConnectInfo(SocketAddr::from((
            [127, 0, 0, 1],
            4000,
        ))))
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn root_reports_service_and_version() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["service"], "admins-api");
        assert_eq!(json["version"], "0.1.0");
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_404() {
        let response = app()
            .oneshot(Request::get("/vendors").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
