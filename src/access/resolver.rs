//! Parent-chain resolution and the public access verdict entry point.

use super::{ResolutionCache, RootSet};
use crate::models::{CacheEntry, ParentLink, ResourceId, ResourceKind};
use crate::workspace::{ApiExecutor, RETRIEVE_BLOCK, RETRIEVE_DATABASE, RETRIEVE_PAGE};
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum block-to-block parent hops followed in one resolution.
///
/// Real workspaces nest blocks tens of levels at most; the bound exists to
/// keep corrupted or adversarial parent graphs from turning one lookup into
/// an unbounded remote walk.
const MAX_BLOCK_DEPTH: usize = 64;

/// Decides whether resources are inside the configured root scope.
///
/// One resolver owns one [`ResolutionCache`]; independent instances never
/// share state. Any number of [`Self::is_page_allowed`] calls may be in
/// flight concurrently: overlapping walks may duplicate upstream lookups
/// for an id neither has cached yet, but they converge on the same verdict,
/// so last-writer-wins cache updates are sound.
pub struct AccessResolver {
    /// Configured root scope.
    roots: RootSet,
    /// Memoized verdicts.
    cache: ResolutionCache,
    /// Workspace API capability.
    executor: Arc<dyn ApiExecutor>,
}

impl AccessResolver {
    /// Creates a resolver over the given root scope and API capability.
    #[must_use]
    pub fn new(roots: RootSet, executor: Arc<dyn ApiExecutor>) -> Self {
        Self {
            roots,
            cache: ResolutionCache::new(),
            executor,
        }
    }

    /// Whether access control is enabled (the root set is non-empty).
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.roots.is_enabled()
    }

    /// The configured root scope.
    #[must_use]
    pub const fn roots(&self) -> &RootSet {
        &self.roots
    }

    /// Drops every memoized verdict; the root set is untouched.
    ///
    /// Intended for administrative reset and test isolation.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Decides whether the resource named by `raw` is inside the root scope.
    ///
    /// With an empty root set the resolver is a pass-through and always
    /// allows. Otherwise the id is canonicalized, checked against the roots
    /// and the cache, and only then resolved against the workspace API:
    /// a kind probe locates the page the resource structurally belongs to,
    /// and the hierarchy walk climbs parent links from there. Unknown
    /// resources, upstream failures, dead-end chains, and cycles all deny.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if `raw` is syntactically
    /// malformed. Upstream failures do not surface here; they resolve to
    /// `Ok(false)`.
    pub async fn is_page_allowed(&self, raw: &str) -> Result<bool> {
        if !self.roots.is_enabled() {
            return Ok(true);
        }

        let id = ResourceId::parse(raw)?;
        if self.roots.contains(&id) {
            return Ok(true);
        }
        if let Some(entry) = self.cache.get(&id) {
            return Ok(entry.is_allowed);
        }

        let Some(page) = self.find_root_page(&id).await else {
            warn!(resource = %id, "resource kind could not be determined, denying");
            self.cache.insert(
                id,
                CacheEntry {
                    parent_id: None,
                    is_allowed: false,
                },
            );
            return Ok(false);
        };

        let allowed = self.check_hierarchy(&page).await;
        self.cache.insert(
            id,
            CacheEntry {
                parent_id: Some(page),
                is_allowed: allowed,
            },
        );
        Ok(allowed)
    }

    /// Locates the page a resource of unknown kind structurally belongs to.
    ///
    /// The remote store does not reveal a resource's kind up front, so the
    /// probe tries fixed interpretations in order: the id is a page itself,
    /// a database whose container page is computed, then a block resolved
    /// up to its page. The first successful non-null result wins; if every
    /// probe fails or comes back empty the resource is unknown. Probe
    /// failures are expected here and stay local.
    async fn find_root_page(&self, id: &ResourceId) -> Option<ResourceId> {
        match self.fetch_parent(ResourceKind::Page, id).await {
            Ok(_) => return Some(id.clone()),
            Err(e) => debug!(resource = %id, error = %e, "page probe failed"),
        }

        let mut scratch = Vec::new();
        match self.resolve_database_parent(id, &mut scratch).await {
            Ok(Some(page)) => return Some(page),
            Ok(None) => {},
            Err(e) => debug!(resource = %id, error = %e, "database probe failed"),
        }

        scratch.clear();
        match self.resolve_block_to_page(id, &mut scratch).await {
            Ok(Some(page)) => return Some(page),
            Ok(None) => {},
            Err(e) => debug!(resource = %id, error = %e, "block probe failed"),
        }

        None
    }

    /// Walks parent links from `start` upward until a root, a dead end, or
    /// a cycle.
    ///
    /// Every node the walk touches lands in the cache: provisional
    /// `{parent, denied}` entries while climbing, rewritten to allowed for
    /// the whole visited chain only when a root is reached. A crash or
    /// failure mid-walk therefore leaves conservative deny entries rather
    /// than none. Revisiting a node already in the walk's visited list is
    /// a cycle and denies.
    async fn check_hierarchy(&self, start: &ResourceId) -> bool {
        let mut visited: Vec<ResourceId> = Vec::new();
        let mut current = Some(start.clone());

        while let Some(node) = current {
            if visited.contains(&node) {
                debug!(resource = %node, "cycle detected in parent chain");
                break;
            }
            visited.push(node.clone());

            if self.roots.contains(&node) {
                for id in &visited {
                    self.cache.insert(
                        id.clone(),
                        CacheEntry {
                            parent_id: None,
                            is_allowed: true,
                        },
                    );
                }
                return true;
            }

            match self.resolve_page_parent(&node, &mut visited).await {
                Ok(parent) => {
                    self.cache.insert(
                        node,
                        CacheEntry {
                            parent_id: parent.clone(),
                            is_allowed: false,
                        },
                    );
                    current = parent;
                },
                Err(e) => {
                    warn!(resource = %node, error = %e, "parent resolution failed, denying");
                    self.cache.insert(
                        node,
                        CacheEntry {
                            parent_id: None,
                            is_allowed: false,
                        },
                    );
                    return false;
                },
            }
        }

        // Dead end or cycle: conservative entries for everything touched.
        for id in visited {
            self.cache.insert_if_absent(
                id,
                CacheEntry {
                    parent_id: None,
                    is_allowed: false,
                },
            );
        }
        false
    }

    /// Resolves the page one structural hop above a page.
    ///
    /// A page parented by a database or a block chain resolves through that
    /// container to the page above it; a page with no parent link is the
    /// top of its chain. Intermediate container ids are appended to `trail`
    /// so the walker's terminal cache writes cover them too.
    async fn resolve_page_parent(
        &self,
        page_id: &ResourceId,
        trail: &mut Vec<ResourceId>,
    ) -> Result<Option<ResourceId>> {
        match self.fetch_parent(ResourceKind::Page, page_id).await? {
            Some(ParentLink::Page(parent)) => Ok(Some(parent)),
            Some(ParentLink::Database(database)) => {
                self.resolve_database_parent(&database, trail).await
            },
            Some(ParentLink::Block(block)) => self.resolve_block_to_page(&block, trail).await,
            None => Ok(None),
        }
    }

    /// Resolves a block up its block chain to the containing page.
    ///
    /// Follows block-to-block links iteratively, bounded by
    /// [`MAX_BLOCK_DEPTH`]; exceeding the bound is an explicit
    /// [`Error::ChainTooDeep`] outcome rather than an unbounded walk.
    async fn resolve_block_to_page(
        &self,
        block_id: &ResourceId,
        trail: &mut Vec<ResourceId>,
    ) -> Result<Option<ResourceId>> {
        let mut current = block_id.clone();
        for _ in 0..MAX_BLOCK_DEPTH {
            if !trail.contains(&current) {
                trail.push(current.clone());
            }
            match self.fetch_parent(ResourceKind::Block, &current).await? {
                Some(ParentLink::Page(page)) => return Ok(Some(page)),
                Some(ParentLink::Block(block)) => current = block,
                Some(ParentLink::Database(database)) => {
                    return Box::pin(self.resolve_database_parent(&database, trail)).await;
                },
                None => return Ok(None),
            }
        }
        Err(Error::ChainTooDeep {
            resource: block_id.to_string(),
            limit: MAX_BLOCK_DEPTH,
        })
    }

    /// Resolves the page containing a database.
    async fn resolve_database_parent(
        &self,
        database_id: &ResourceId,
        trail: &mut Vec<ResourceId>,
    ) -> Result<Option<ResourceId>> {
        if !trail.contains(database_id) {
            trail.push(database_id.clone());
        }
        match self.fetch_parent(ResourceKind::Database, database_id).await? {
            Some(ParentLink::Page(page)) => Ok(Some(page)),
            Some(ParentLink::Block(block)) => {
                Box::pin(self.resolve_block_to_page(&block, trail)).await
            },
            _ => Ok(None),
        }
    }

    /// Fetches a resource's declared parent under an assumed kind.
    async fn fetch_parent(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<Option<ParentLink>> {
        let operation = match kind {
            ResourceKind::Page => &RETRIEVE_PAGE,
            ResourceKind::Database => &RETRIEVE_DATABASE,
            ResourceKind::Block => &RETRIEVE_BLOCK,
        };

        let mut params = HashMap::new();
        if let Some(name) = operation.path_params.first() {
            params.insert((*name).to_string(), id.to_string());
        }

        let data = self.executor.execute(operation, &params, None).await?;
        ParentLink::from_response(&data)
    }
}
