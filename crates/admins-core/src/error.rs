use std::time::Duration;

/// Error type handed back by lookup and persistence ports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(thiserror::Error, Debug)]
pub enum HandleError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("handle lookup failed: {0}")]
    LookupFailure(#[source] BoxError),

    #[error("no numeric suffix left for handle {0}")]
    SuffixExhausted(String),
}

#[derive(thiserror::Error, Debug)]
#[error("handle lookup timed out after {0:?}")]
pub struct LookupTimedOut(pub Duration);

#[derive(thiserror::Error, Debug)]
pub enum InsertError {
    #[error("username is already taken")]
    UsernameTaken,

    #[error("auth user already owns a profile")]
    AlreadyRegistered,

    #[error("profile insert failed: {0}")]
    Other(#[source] BoxError),
}

#[derive(thiserror::Error, Debug)]
pub enum SignupError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("username lookup failed: {0}")]
    LookupFailure(#[source] BoxError),

    #[error("username {username} was taken concurrently")]
    UniquenessConflict { username: String },

    #[error("auth user already owns a profile")]
    AlreadyRegistered,

    #[error("profile persistence failed: {0}")]
    Persistence(#[source] BoxError),
}

impl From<HandleError> for SignupError {
    fn from(e: HandleError) -> Self {
        match e {
            HandleError::InvalidInput(msg) => SignupError::InvalidInput(msg),
            HandleError::LookupFailure(source) => SignupError::LookupFailure(source),
            HandleError::SuffixExhausted(base) => SignupError::UniquenessConflict { username: base },
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum JwtError {
    #[error("missing bearer token")]
    Missing,

    #[error("invalid token")]
    Invalid,

    #[error("expired token")]
    Expired,

    #[error("token carries no email")]
    MissingEmail,

    #[error("token creation failed")]
    Creation,
}
