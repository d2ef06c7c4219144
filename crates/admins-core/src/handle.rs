//! Username ("handle") generation for new admin profiles.
//!
//! A handle is `"a"` + the first letter of the first name + the last name,
//! lower-cased. When that base is already taken the smallest suffix above
//! the highest numeric suffix in use is appended: `aareyes`, `aareyes1`,
//! `aareyes2`, ...
//!
//! Names are normalized before derivation: lower-cased, and everything that
//! is not alphanumeric (spaces, apostrophes, hyphens, dots) is dropped, so
//! `"O'Neil-Smith"` contributes `"oneilsmith"`.
//!
//! The suffix scan is an approximation. Any existing handle of the form
//! `base + digits` raises the maximum even when it belongs to an unrelated
//! person, handles of the form `base + letters` are ignored, and gaps in the
//! sequence are never reused. Uniqueness is only guaranteed against the
//! snapshot returned by the lookup; the persistence layer stays the
//! authoritative guard (see [`crate::signup`]).

use std::fmt;

use crate::{error::HandleError, lookup::HandleLookup};

const HANDLE_PREFIX: char = 'a';

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BaseHandle(String);

impl BaseHandle {
    pub fn derive(first_name: &str, last_name: &str) -> Result<Self, HandleError> {
        let first = normalize_name(first_name);
        let last = normalize_name(last_name);

        let Some(initial) = first.chars().next() else {
            return Err(HandleError::InvalidInput("first name is required"));
        };
        if last.is_empty() {
            return Err(HandleError::InvalidInput("last name is required"));
        }

        let mut base = String::with_capacity(1 + initial.len_utf8() + last.len());
        base.push(HANDLE_PREFIX);
        base.push(initial);
        base.push_str(&last);

        Ok(Self(base))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BaseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-cases `name` and keeps only alphanumeric characters.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Base handle only, without consulting existing handles.
pub fn preview(first_name: &str, last_name: &str) -> Result<String, HandleError> {
    BaseHandle::derive(first_name, last_name).map(BaseHandle::into_string)
}

/// Resolves a handle for `first_name`/`last_name` that is absent from the
/// snapshot `lookup` returns for the base handle.
#[tracing::instrument(name = "handle.generate", skip(lookup), err)]
pub async fn generate<L>(first_name: &str, last_name: &str, lookup: &L) -> Result<String, HandleError>
where
    L: HandleLookup + ?Sized,
{
    let base = BaseHandle::derive(first_name, last_name)?;

    let existing = lookup
        .find_by_prefix(base.as_str())
        .await
        .map_err(HandleError::LookupFailure)?;

    let handle = next_handle(&base, &existing)?;
    tracing::debug!(%base, taken = existing.len(), %handle, "handle resolved");

    Ok(handle)
}

/// Picks the handle for `base` given the handles already sharing its prefix.
pub fn next_handle<S>(base: &BaseHandle, existing: &[S]) -> Result<String, HandleError>
where
    S: AsRef<str>,
{
    if existing.is_empty() {
        return Ok(base.as_str().to_string());
    }

    let highest = existing
        .iter()
        .filter_map(|handle| suffix_of(base.as_str(), handle.as_ref()))
        .max()
        .unwrap_or(0);

    let next = highest
        .checked_add(1)
        .ok_or_else(|| HandleError::SuffixExhausted(base.to_string()))?;

    Ok(format!("{base}{next}"))
}

// `None` for handles outside the base's prefix. The bare base and remainders
// that are not a plain decimal number count as `0`.
fn suffix_of(base: &str, handle: &str) -> Option<u64> {
    let handle = handle.to_lowercase();
    let remainder = handle.strip_prefix(base)?;

    if remainder.is_empty() || !remainder.bytes().all(|b| b.is_ascii_digit()) {
        return Some(0);
    }

    Some(remainder.parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::BoxError;

    struct Snapshot {
        handles: Vec<String>,
        calls: AtomicUsize,
    }

    impl Snapshot {
        fn of(handles: &[&str]) -> Self {
            Self {
                handles: handles.iter().map(|h| h.to_string()).collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl HandleLookup for Snapshot {
        async fn find_by_prefix(&self, prefix: &str) -> Result<Vec<String>, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let prefix = prefix.to_lowercase();
            Ok(self
                .handles
                .iter()
                .filter(|h| h.to_lowercase().starts_with(&prefix))
                .cloned()
                .collect())
        }
    }

    struct Unavailable;

    #[async_trait]
    impl HandleLookup for Unavailable {
        async fn find_by_prefix(&self, _prefix: &str) -> Result<Vec<String>, BoxError> {
            Err("backend unavailable".into())
        }
    }

    fn base(first: &str, last: &str) -> BaseHandle {
        BaseHandle::derive(first, last).unwrap()
    }

    #[test]
    fn base_handle_uses_initial_and_last_name() {
        assert_eq!(base("Ana", "Reyes").as_str(), "aareyes");
        assert_eq!(base("bob", "JONES").as_str(), "abjones");
    }

    #[test]
    fn base_handle_drops_punctuation_and_spaces() {
        assert_eq!(base("Liam", "O'Neil-Smith").as_str(), "aloneilsmith");
        assert_eq!(base("Mary Ann", "van der Berg").as_str(), "amvanderberg");
        assert_eq!(base(".Zoe", "Ng").as_str(), "azng");
    }

    #[test]
    fn base_handle_keeps_non_ascii_letters() {
        assert_eq!(base("Élodie", "Müller").as_str(), "aémüller");
    }

    #[test]
    fn empty_or_symbol_only_names_are_rejected() {
        assert!(matches!(
            BaseHandle::derive("", "Reyes"),
            Err(HandleError::InvalidInput(_))
        ));
        assert!(matches!(
            BaseHandle::derive("Ana", ""),
            Err(HandleError::InvalidInput(_))
        ));
        assert!(matches!(
            BaseHandle::derive("Ana", " - "),
            Err(HandleError::InvalidInput(_))
        ));
    }

    #[test]
    fn next_handle_appends_one_after_bare_base() {
        let b = base("Ana", "Reyes");
        assert_eq!(next_handle(&b, &["aareyes"]).unwrap(), "aareyes1");
    }

    #[test]
    fn next_handle_does_not_fill_gaps() {
        let b = base("Ana", "Reyes");
        let taken = ["aareyes", "aareyes1", "aareyes3"];
        assert_eq!(next_handle(&b, &taken).unwrap(), "aareyes4");
    }

    #[test]
    fn non_numeric_remainders_do_not_raise_the_maximum() {
        let b = base("Ana", "Reyes");
        let taken = ["aareyes", "aareyesmith", "aareyes2x"];
        assert_eq!(next_handle(&b, &taken).unwrap(), "aareyes1");
    }

    #[test]
    fn only_unrelated_prefix_matches_yields_suffix_one() {
        let b = base("Ana", "Reyes");
        assert_eq!(next_handle(&b, &["aareyesmith"]).unwrap(), "aareyes1");
    }

    #[test]
    fn comparison_ignores_case() {
        let b = base("Ana", "Reyes");
        let taken = ["AAReyes", "aaREYES7"];
        assert_eq!(next_handle(&b, &taken).unwrap(), "aareyes8");
    }

    #[test]
    fn suffix_overflow_is_reported() {
        let b = base("Ana", "Reyes");
        let taken = [format!("aareyes{}", u64::MAX)];
        assert!(matches!(
            next_handle(&b, &taken),
            Err(HandleError::SuffixExhausted(_))
        ));
    }

    #[test]
    fn result_is_never_in_the_snapshot() {
        let b = base("Ana", "Reyes");
        let taken = ["aareyes", "aareyes01", "aareyes2", "aareyes10", "aareyesx"];
        let handle = next_handle(&b, &taken).unwrap();
        assert_eq!(handle, "aareyes11");
        assert!(!taken.contains(&handle.as_str()));
    }

    #[test]
    fn preview_is_the_base_handle() {
        assert_eq!(preview("Ana", "Reyes").unwrap(), "aareyes");
    }

    #[tokio::test]
    async fn empty_snapshot_returns_base() {
        let lookup = Snapshot::of(&[]);
        assert_eq!(generate("Ana", "Reyes", &lookup).await.unwrap(), "aareyes");
    }

    #[tokio::test]
    async fn taken_base_gets_next_suffix() {
        let lookup = Snapshot::of(&["aareyes", "aareyes1", "aareyes3", "abjones"]);
        assert_eq!(generate("Ana", "Reyes", &lookup).await.unwrap(), "aareyes4");
    }

    #[tokio::test]
    async fn same_snapshot_gives_same_handle() {
        let lookup = Snapshot::of(&["aareyes"]);
        let first = generate("Ana", "Reyes", &lookup).await.unwrap();
        let second = generate("Ana", "Reyes", &lookup).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn invalid_input_skips_the_lookup() {
        let lookup = Snapshot::of(&[]);
        let err = generate("", "Reyes", &lookup).await.unwrap_err();

        assert!(matches!(err, HandleError::InvalidInput(_)));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lookup_failure_propagates() {
        let err = generate("Ana", "Reyes", &Unavailable).await.unwrap_err();
        assert!(matches!(err, HandleError::LookupFailure(_)));
    }
}
