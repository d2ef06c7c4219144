use admins_core::error::SignupError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use factory::factories::database::error::DatabaseError;
use http_contracts::error::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error("Validation errors, {0}")]
    ValidatorValidationErrors(#[from] validator::ValidationErrors),
    #[error("{0}")]
    NotFoundError(String),
    #[error("Signup failed: {0}")]
    SignupFailed(#[from] SignupError),
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            Self::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            Self::ValidatorValidationErrors(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            Self::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            Self::SignupFailed(e) => signup_failure(&e),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        ErrorResponse::new(msg).with_status(status)
    }
}

// Lookup and persistence details stay in the logs; callers get a generic
// message they can act on.
fn signup_failure(e: &SignupError) -> (StatusCode, String) {
    match e {
        SignupError::InvalidInput(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.to_string()),
        SignupError::LookupFailure(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Signup failed, please try again later".to_string(),
        ),
        SignupError::UniquenessConflict { .. } => (
            StatusCode::CONFLICT,
            "Signup failed, please try again".to_string(),
        ),
        SignupError::AlreadyRegistered => (
            StatusCode::CONFLICT,
            "Signup already completed for this account".to_string(),
        ),
        SignupError::Persistence(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Signup failed".to_string(),
        ),
    }
}
