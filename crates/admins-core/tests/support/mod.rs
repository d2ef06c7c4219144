use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use admins_core::{
    error::{BoxError, InsertError},
    jwt::AuthSession,
    lookup::HandleLookup,
    memory::MemoryProfileStore,
    models::{AdminProfile, NewAdminProfile},
    signup::ProfileStore,
};
use async_trait::async_trait;
use tokio::sync::Barrier;
use uuid::Uuid;

/// Memory store whose first `gated` lookups all wait for each other, so every
/// gated signup reads the same snapshot before anyone inserts.
pub struct GatedStore {
    pub inner: MemoryProfileStore,
    barrier: Barrier,
    gated: usize,
    pub lookups: AtomicUsize,
}

impl GatedStore {
    pub fn new(inner: MemoryProfileStore, gated: usize) -> Arc<Self> {
        Arc::new(Self {
            inner,
            barrier: Barrier::new(gated),
            gated,
            lookups: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl HandleLookup for GatedStore {
    async fn find_by_prefix(&self, prefix: &str) -> Result<Vec<String>, BoxError> {
        let call = self.lookups.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.inner.find_by_prefix(prefix).await?;
        if call < self.gated {
            self.barrier.wait().await;
        }
        Ok(snapshot)
    }
}

#[async_trait]
impl ProfileStore for GatedStore {
    async fn insert_profile(&self, profile: &NewAdminProfile) -> Result<AdminProfile, InsertError> {
        self.inner.insert_profile(profile).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminProfile>, BoxError> {
        self.inner.find_by_username(username).await
    }
}

pub fn session(email: &str) -> AuthSession {
    AuthSession {
        auth_user_id: Uuid::new_v4(),
        email: email.to_string(),
    }
}
