use admins_core::jwt::AuthSession;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;
use validator::Validate;

use crate::{
    error::AppError,
    features::schemas::{ProfileLoginOut, SignupIn, UsernamePreviewOut, UsernamePreviewQuery},
    utilities::app_state::AdminSignupService,
};

#[tracing::instrument(
    name = "signup_handler",
    skip_all,
    fields(auth_user_id = %session.auth_user_id),
    err
)]
pub async fn signup_handler(
    session: AuthSession,
    State(signup_service): State<AdminSignupService>,
    Json(signup_in): Json<SignupIn>,
) -> Result<impl IntoResponse, AppError> {
    signup_in.validate()?;

    let profile = signup_service.signup(&session, signup_in.into()).await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

#[tracing::instrument(name = "username_preview_handler", skip_all, err)]
pub async fn username_preview_handler(
    State(signup_service): State<AdminSignupService>,
    Query(query): Query<UsernamePreviewQuery>,
) -> Result<impl IntoResponse, AppError> {
    let username = signup_service.preview_username(&query.first_name, &query.last_name)?;

    Ok(Json(UsernamePreviewOut { username }))
}

/// Resolves a username to the sign-in email. Called before the caller has a
/// session, so it answers without one and exposes nothing else of the row.
#[tracing::instrument(name = "get_profile_handler", skip(signup_service), err)]
pub async fn get_profile_handler(
    State(signup_service): State<AdminSignupService>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let profile = signup_service
        .find_profile(&username)
        .await
        .map_err(|e| {
            error!(error = %e, "profile lookup failed");
            AppError::ServiceUnavailable("Profile lookup failed".to_string())
        })?
        .ok_or_else(|| AppError::NotFoundError(format!("Admin {username} not found")))?;

    Ok(Json(ProfileLoginOut::from(profile)))
}
