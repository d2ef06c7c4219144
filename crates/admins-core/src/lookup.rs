use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::error::{BoxError, LookupTimedOut};

/// Prefix search over the persisted handles.
///
/// Implementations return every existing handle that starts with `prefix`
/// (case-insensitive), ordered ascending. The result is a point-in-time
/// snapshot; nothing is reserved.
#[async_trait]
pub trait HandleLookup: Send + Sync {
    async fn find_by_prefix(&self, prefix: &str) -> Result<Vec<String>, BoxError>;
}

#[async_trait]
impl<T> HandleLookup for Arc<T>
where
    T: HandleLookup + ?Sized,
{
    async fn find_by_prefix(&self, prefix: &str) -> Result<Vec<String>, BoxError> {
        (**self).find_by_prefix(prefix).await
    }
}

#[async_trait]
impl<T> HandleLookup for &T
where
    T: HandleLookup + ?Sized,
{
    async fn find_by_prefix(&self, prefix: &str) -> Result<Vec<String>, BoxError> {
        (**self).find_by_prefix(prefix).await
    }
}

/// Caps how long a single lookup may take. Expiry is reported as an
/// ordinary lookup error.
pub struct TimeoutLookup<L> {
    inner: L,
    timeout: Option<Duration>,
}

impl<L> TimeoutLookup<L> {
    pub fn new(inner: L, timeout: Option<Duration>) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<L> HandleLookup for TimeoutLookup<L>
where
    L: HandleLookup,
{
    async fn find_by_prefix(&self, prefix: &str) -> Result<Vec<String>, BoxError> {
        match self.timeout {
            None => self.inner.find_by_prefix(prefix).await,
            Some(limit) => tokio::time::timeout(limit, self.inner.find_by_prefix(prefix))
                .await
                .map_err(|_| Box::new(LookupTimedOut(limit)) as BoxError)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowLookup(Duration);

    #[async_trait]
    impl HandleLookup for SlowLookup {
        async fn find_by_prefix(&self, prefix: &str) -> Result<Vec<String>, BoxError> {
            tokio::time::sleep(self.0).await;
            Ok(vec![prefix.to_string()])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn expired_lookup_reports_timeout() {
        let lookup = TimeoutLookup::new(
            SlowLookup(Duration::from_secs(10)),
            Some(Duration::from_millis(50)),
        );

        let err = lookup.find_by_prefix("aareyes").await.unwrap_err();
        assert!(err.downcast_ref::<LookupTimedOut>().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn lookup_within_limit_passes_through() {
        let lookup = TimeoutLookup::new(
            SlowLookup(Duration::from_millis(10)),
            Some(Duration::from_secs(1)),
        );

        let found = lookup.find_by_prefix("aareyes").await.unwrap();
        assert_eq!(found, vec!["aareyes".to_string()]);
    }

    #[tokio::test]
    async fn no_limit_means_no_timeout() {
        let lookup = TimeoutLookup::new(SlowLookup(Duration::from_millis(1)), None);

        assert!(lookup.find_by_prefix("abjones").await.is_ok());
    }
}
