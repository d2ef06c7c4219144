use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{BoxError, InsertError},
    lookup::HandleLookup,
    models::{AdminProfile, NewAdminProfile},
    signup::ProfileStore,
};

/// In-process profile store with the same uniqueness rules as the
/// `admin_profiles` table: one profile per auth user and case-insensitively
/// unique usernames.
#[derive(Clone, Default)]
pub struct MemoryProfileStore {
    profiles: Arc<Mutex<Vec<AdminProfile>>>,
}

impl MemoryProfileStore {
    pub async fn len(&self) -> usize {
        self.profiles.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.lock().await.is_empty()
    }

    pub async fn usernames(&self) -> Vec<String> {
        let mut usernames: Vec<String> = self
            .profiles
            .lock()
            .await
            .iter()
            .map(|p| p.username.clone())
            .collect();
        usernames.sort();
        usernames
    }
}

#[async_trait]
impl HandleLookup for MemoryProfileStore {
    async fn find_by_prefix(&self, prefix: &str) -> Result<Vec<String>, BoxError> {
        let prefix = prefix.to_lowercase();
        let mut found: Vec<String> = self
            .profiles
            .lock()
            .await
            .iter()
            .filter(|p| p.username.to_lowercase().starts_with(&prefix))
            .map(|p| p.username.clone())
            .collect();
        found.sort();
        Ok(found)
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn insert_profile(&self, profile: &NewAdminProfile) -> Result<AdminProfile, InsertError> {
        let mut profiles = self.profiles.lock().await;

        let username = profile.username.to_lowercase();
        if profiles.iter().any(|p| p.username.to_lowercase() == username) {
            return Err(InsertError::UsernameTaken);
        }
        if profiles
            .iter()
            .any(|p| p.auth_user_id == profile.auth_user_id)
        {
            return Err(InsertError::AlreadyRegistered);
        }

        let now = Utc::now();
        let stored = AdminProfile {
            id: Uuid::new_v4(),
            auth_user_id: profile.auth_user_id,
            username: profile.username.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            phone_number: profile.phone_number.clone(),
            role: profile.role,
            status: profile.status,
            created_at: now,
            updated_at: now,
        };
        profiles.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminProfile>, BoxError> {
        let username = username.to_lowercase();
        Ok(self
            .profiles
            .lock()
            .await
            .iter()
            .find(|p| p.username.to_lowercase() == username)
            .cloned())
    }
}
