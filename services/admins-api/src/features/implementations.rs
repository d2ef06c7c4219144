use admins_core::{
    error::{BoxError, InsertError},
    lookup::HandleLookup,
    models::{AdminProfile, NewAdminProfile},
    signup::ProfileStore,
};
use async_trait::async_trait;
use factory::factories::database::Database;

use crate::features::repository::AdminProfilesRepository;

const USERNAME_UNIQUE_INDEX: &str = "admin_profiles_username_lower_key";
const AUTH_USER_UNIQUE_INDEX: &str = "admin_profiles_auth_user_id_key";

/// Postgres-backed profile store over the `admin_profiles` table.
#[derive(Clone)]
pub struct PgProfileStore {
    database: Database,
}

impl PgProfileStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl HandleLookup for PgProfileStore {
    async fn find_by_prefix(&self, prefix: &str) -> Result<Vec<String>, BoxError> {
        AdminProfilesRepository::find_usernames_by_prefix(prefix, &self.database.pool)
            .await
            .map_err(BoxError::from)
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn insert_profile(&self, profile: &NewAdminProfile) -> Result<AdminProfile, InsertError> {
        AdminProfilesRepository::create_admin_profile(profile, &self.database.pool)
            .await
            .map_err(classify_insert_error)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminProfile>, BoxError> {
        AdminProfilesRepository::find_admin_profile_by_username(username, &self.database.pool)
            .await
            .map_err(BoxError::from)
    }
}

fn classify_insert_error(e: sqlx::Error) -> InsertError {
    if let sqlx::Error::Database(db) = &e
        && db.is_unique_violation()
    {
        match db.constraint() {
            Some(USERNAME_UNIQUE_INDEX) => return InsertError::UsernameTaken,
            Some(AUTH_USER_UNIQUE_INDEX) => return InsertError::AlreadyRegistered,
            _ => {}
        }
    }

    InsertError::Other(e.into())
}
