use axum::{
    Json, RequestPartsExt,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use serde_json::json;

use crate::{
    error::JwtError,
    jwt::{AuthSession, JwtCapability, verify_session_token},
};

// The state only has to hand out something that can verify tokens:
// Box<dyn JwtCapability>: FromRef<S>.
impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
    Box<dyn JwtCapability>: FromRef<S>,
{
    type Rejection = JwtError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| JwtError::Missing)?;

        let config = Box::<dyn JwtCapability>::from_ref(state);
        let claims = verify_session_token(&*config, bearer.token())?;

        AuthSession::try_from(claims)
    }
}

impl IntoResponse for JwtError {
    fn into_response(self) -> Response {
        let status = match self {
            JwtError::Creation => StatusCode::INTERNAL_SERVER_ERROR,
            JwtError::Missing | JwtError::Invalid | JwtError::Expired | JwtError::MissingEmail => {
                StatusCode::UNAUTHORIZED
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use chrono::Duration;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::jwt::{JwtConfig, create_session_token};

    #[derive(Clone)]
    struct TestState {
        jwt: JwtConfig,
    }

    impl FromRef<TestState> for Box<dyn JwtCapability> {
        fn from_ref(state: &TestState) -> Self {
            Box::new(state.jwt.clone())
        }
    }

    fn router() -> (Router, JwtConfig) {
        let jwt = JwtConfig {
            secret_key: "extractor-secret".to_string(),
            audience: None,
        };
        let app = Router::new()
            .route(
                "/whoami",
                get(|session: AuthSession| async move { session.email }),
            )
            .with_state(TestState { jwt: jwt.clone() });
        (app, jwt)
    }

    #[tokio::test]
    async fn bearer_token_becomes_a_session() {
        let (app, jwt) = router();
        let token = create_session_token(
            &jwt,
            Uuid::new_v4(),
            Some("staff@market.test"),
            Duration::minutes(5),
        )
        .unwrap();

        let response = app
            .oneshot(
                Request::get("/whoami")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"staff@market.test");
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let (app, _) = router();

        let response = app
            .oneshot(Request::get("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
