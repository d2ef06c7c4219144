pub mod handlers;
pub mod implementations;
pub mod repository;
pub mod schemas;


use crate::utilities::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/admins/signup", post(handlers::signup_handler))
        .route(
            "/api/v1/admins/username-preview",
            get(handlers::username_preview_handler),
        )
        .route(
            "/api/v1/admins/profiles/{username}",
            get(handlers::get_profile_handler),
        )
}
