//! Completing an invited admin's signup: resolve a username, then write the
//! profile row.
//!
//! Handle resolution is read-then-write with no reservation, so two
//! concurrent signups for the same name can pick the same username. The
//! store's unique index on the username is the authoritative guard: when an
//! insert is rejected as a duplicate the username is resolved again against
//! a fresh snapshot and the insert is retried once. A second rejection ends
//! the signup with [`SignupError::UniquenessConflict`].

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    error::{BoxError, InsertError, SignupError},
    handle,
    jwt::AuthSession,
    lookup::{HandleLookup, TimeoutLookup},
    models::{AdminProfile, AdminRole, AdminStatus, NewAdminProfile},
};

/// Initial insert plus the single retry after a uniqueness conflict.
const MAX_INSERT_ATTEMPTS: usize = 2;

#[async_trait]
pub trait ProfileStore: HandleLookup {
    async fn insert_profile(&self, profile: &NewAdminProfile) -> Result<AdminProfile, InsertError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminProfile>, BoxError>;
}

#[async_trait]
impl<T> ProfileStore for Arc<T>
where
    T: ProfileStore + ?Sized,
{
    async fn insert_profile(&self, profile: &NewAdminProfile) -> Result<AdminProfile, InsertError> {
        (**self).insert_profile(profile).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminProfile>, BoxError> {
        (**self).find_by_username(username).await
    }
}

#[derive(Deserialize, Clone, Default, Debug)]
pub struct SignupConfig {
    #[serde(default)]
    pub lookup_timeout_ms: Option<u64>,
}

impl SignupConfig {
    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.lookup_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl SignupForm {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
        }
    }

    pub fn trimmed(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
        }
    }

    fn ensure_names(&self) -> Result<(), SignupError> {
        if self.first_name.is_empty() {
            return Err(SignupError::InvalidInput("first name is required"));
        }
        if self.last_name.is_empty() {
            return Err(SignupError::InvalidInput("last name is required"));
        }
        Ok(())
    }

    fn into_profile(self, session: &AuthSession, username: String) -> NewAdminProfile {
        let phone_number = Some(self.phone_number).filter(|phone| !phone.is_empty());

        NewAdminProfile {
            auth_user_id: session.auth_user_id,
            username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: session.email.clone(),
            phone_number,
            role: AdminRole::Admin,
            status: AdminStatus::Active,
        }
    }
}

#[derive(Clone)]
pub struct SignupService<S> {
    store: S,
    lookup_timeout: Option<Duration>,
}

impl<S> SignupService<S>
where
    S: ProfileStore,
{
    pub fn new(store: S, cfg: &SignupConfig) -> Self {
        Self {
            store,
            lookup_timeout: cfg.lookup_timeout(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[tracing::instrument(
        name = "signup_service.signup",
        skip(self, form),
        fields(auth_user_id = %session.auth_user_id),
        err
    )]
    pub async fn signup(
        &self,
        session: &AuthSession,
        form: SignupForm,
    ) -> Result<AdminProfile, SignupError> {
        let form = form.trimmed();
        form.ensure_names()?;

        let lookup = TimeoutLookup::new(&self.store, self.lookup_timeout);

        let mut attempt = 1;
        loop {
            let username = handle::generate(&form.first_name, &form.last_name, &lookup).await?;
            let profile = form.clone().into_profile(session, username.clone());

            match self.store.insert_profile(&profile).await {
                Ok(stored) => {
                    info!(username = %stored.username, attempt, "admin profile created");
                    return Ok(stored);
                }
                Err(InsertError::UsernameTaken) if attempt < MAX_INSERT_ATTEMPTS => {
                    warn!(%username, attempt, "username taken concurrently, resolving again");
                    attempt += 1;
                }
                Err(InsertError::UsernameTaken) => {
                    return Err(SignupError::UniquenessConflict { username });
                }
                Err(InsertError::AlreadyRegistered) => return Err(SignupError::AlreadyRegistered),
                Err(InsertError::Other(e)) => return Err(SignupError::Persistence(e)),
            }
        }
    }

    pub fn preview_username(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<String, SignupError> {
        Ok(handle::preview(first_name.trim(), last_name.trim())?)
    }

    #[tracing::instrument(name = "signup_service.find_profile", skip(self), err)]
    pub async fn find_profile(&self, username: &str) -> Result<Option<AdminProfile>, SignupError> {
        self.store
            .find_by_username(username.trim())
            .await
            .map_err(SignupError::Persistence)
    }
}
