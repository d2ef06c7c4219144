use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::JwtError;

/// Claims of a session token issued by the hosted auth platform.
#[derive(Serialize, Deserialize, Debug)]
pub struct SessionClaims {
    pub sub: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct JwtConfig {
    pub secret_key: String,
    #[serde(default)]
    pub audience: Option<String>,
}

pub trait JwtCapability: Send + Sync {
    fn jwt_secret(&self) -> &str;
    fn jwt_audience(&self) -> Option<&str>;
}

impl JwtCapability for JwtConfig {
    fn jwt_secret(&self) -> &str {
        &self.secret_key
    }

    fn jwt_audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }
}

/// Authenticated caller, passed explicitly into every flow that needs it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AuthSession {
    pub auth_user_id: Uuid,
    pub email: String,
}

impl TryFrom<SessionClaims> for AuthSession {
    type Error = JwtError;

    fn try_from(claims: SessionClaims) -> Result<Self, Self::Error> {
        let email = claims
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or(JwtError::MissingEmail)?;

        Ok(Self {
            auth_user_id: claims.sub,
            email,
        })
    }
}

#[tracing::instrument(name = "verify_session_token", skip(cfg, token), err)]
pub fn verify_session_token<C: JwtCapability + ?Sized>(
    cfg: &C,
    token: &str,
) -> Result<SessionClaims, JwtError> {
    let decoding_key = DecodingKey::from_secret(cfg.jwt_secret().as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    match cfg.jwt_audience() {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }

    decode::<SessionClaims>(token, &decoding_key, &validation)
        .map(|d| d.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Invalid,
        })
}

/// Signs a session token the way the auth platform does. Used by tooling and
/// tests; production tokens come from the platform.
#[tracing::instrument(name = "create_session_token", skip(cfg, email), err)]
pub fn create_session_token<C: JwtCapability + ?Sized>(
    cfg: &C,
    auth_user_id: Uuid,
    email: Option<&str>,
    expires_in: Duration,
) -> Result<String, JwtError> {
    let now = Utc::now();

    let claims = SessionClaims {
        sub: auth_user_id,
        email: email.map(str::to_string),
        aud: cfg.jwt_audience().map(str::to_string),
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(cfg.jwt_secret().as_bytes());
    encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|_| JwtError::Creation)
}
