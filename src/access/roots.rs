//! Root scope construction.

use crate::config::AccessSettings;
use crate::models::ResourceId;
use std::collections::HashSet;

/// Environment fallback for root page ids (comma-separated).
pub const ROOT_IDS_ENV: &str = "PAGEGATE_ROOT_PAGE_IDS";

/// Environment fallback for root page URLs (comma-separated).
pub const ROOT_URLS_ENV: &str = "PAGEGATE_ROOT_PAGE_URLS";

/// The immutable set of root page ids defining the allowed access boundary.
///
/// Built once at startup and never mutated afterwards. An empty set means
/// access control is disabled and every query is allowed through.
#[derive(Debug, Clone, Default)]
pub struct RootSet {
    ids: HashSet<ResourceId>,
}

impl RootSet {
    /// Builds the root set from access settings.
    ///
    /// Explicit ids and URLs are merged; the environment variables
    /// [`ROOT_IDS_ENV`] and [`ROOT_URLS_ENV`] are consulted only when both
    /// explicit lists are empty. Malformed entries are logged and skipped
    /// so one typo never disables the rest of the scope.
    #[must_use]
    pub fn build(settings: &AccessSettings) -> Self {
        let (env_ids, env_urls) =
            if settings.root_page_ids.is_empty() && settings.root_page_urls.is_empty() {
                (env_csv(ROOT_IDS_ENV), env_csv(ROOT_URLS_ENV))
            } else {
                (Vec::new(), Vec::new())
            };

        Self::from_sources(
            &settings.root_page_ids,
            &settings.root_page_urls,
            &env_ids,
            &env_urls,
        )
    }

    /// Builds the root set from already-collected sources.
    ///
    /// The env slices are merged unconditionally here; [`Self::build`]
    /// applies the explicit-sources-take-precedence rule before calling.
    pub(crate) fn from_sources(
        ids: &[String],
        urls: &[String],
        env_ids: &[String],
        env_urls: &[String],
    ) -> Self {
        let mut set = HashSet::new();

        for raw in ids.iter().chain(env_ids) {
            match ResourceId::parse(raw) {
                Ok(id) => {
                    set.insert(id);
                },
                Err(e) => {
                    tracing::warn!(entry = %raw, error = %e, "skipping malformed root id");
                },
            }
        }

        for raw in urls.iter().chain(env_urls) {
            match ResourceId::from_url(raw) {
                Ok(id) => {
                    set.insert(id);
                },
                Err(e) => {
                    tracing::warn!(entry = %raw, error = %e, "skipping malformed root url");
                },
            }
        }

        Self { ids: set }
    }

    /// Whether access control is enabled (the set is non-empty).
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.ids.is_empty()
    }

    /// Whether the given id is a configured root.
    #[must_use]
    pub fn contains(&self, id: &ResourceId) -> bool {
        self.ids.contains(id)
    }

    /// Number of configured roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Splits a comma-separated environment variable into trimmed entries.
fn env_csv(name: &str) -> Vec<String> {
    std::env::var(name)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const P1: &str = "11111111-1111-1111-1111-111111111111";
    const P2: &str = "22222222-2222-2222-2222-222222222222";

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_explicit_ids_normalized_and_deduped() {
        let set = RootSet::from_sources(
            &owned(&[P1, "11111111111111111111111111111111", P2]),
            &[],
            &[],
            &[],
        );
        assert_eq!(set.len(), 2);
        assert!(set.contains(&ResourceId::parse(P1).unwrap()));
        assert!(set.contains(&ResourceId::parse(P2).unwrap()));
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let set = RootSet::from_sources(&owned(&["garbage", P1]), &owned(&["not a url"]), &[], &[]);
        assert_eq!(set.len(), 1);
        assert!(set.is_enabled());
    }

    #[test]
    fn test_urls_merge_with_ids() {
        let url = format!("https://www.example.so/Team-Home-{}", P2.replace('-', ""));
        let set = RootSet::from_sources(&owned(&[P1]), &[url], &[], &[]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_env_sources_merge() {
        let set = RootSet::from_sources(&[], &[], &owned(&[P1]), &owned(&[]));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_empty_set_disables_access_control() {
        let set = RootSet::from_sources(&[], &[], &[], &[]);
        assert!(!set.is_enabled());
        assert!(set.is_empty());
    }
}
