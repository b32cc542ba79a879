//! Domain types for workspace resources.

mod resource;

pub use resource::{CacheEntry, ParentLink, ResourceId, ResourceKind};
