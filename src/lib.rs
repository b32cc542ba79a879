//! # Pagegate
//!
//! Scoped-access MCP gateway for hierarchical workspace APIs.
//!
//! Pagegate sits between an MCP client and a workspace API whose resources
//! (pages, databases, blocks) form a parent/child hierarchy. A set of root
//! pages is configured at startup; every proxied tool call is allowed only
//! when the resource it touches is one of those roots or a descendant of
//! one, determined by lazily walking the remote parent chain and memoizing
//! the verdicts.
//!
//! ## Features
//!
//! - Root scope from explicit ids, page URLs, or environment fallback
//! - Parent-chain resolution across page, database, and block containers
//! - Cycle-safe, depth-bounded hierarchy walking over remote data
//! - Per-resolver verdict cache, safe under concurrent queries
//! - MCP stdio server proxying a fixed set of workspace tools
//!
//! ## Example
//!
//! ```rust,ignore
//! use pagegate::access::{AccessResolver, RootSet};
//! use pagegate::config::GateConfig;
//! use pagegate::workspace::HttpWorkspaceClient;
//! use std::sync::Arc;
//!
//! let config = GateConfig::load_default();
//! let client = Arc::new(HttpWorkspaceClient::from_config(&config.api)?);
//! let resolver = AccessResolver::new(RootSet::build(&config.access), client);
//! let allowed = resolver.is_page_allowed("1a2b3c4d-...").await?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod access;
pub mod cli;
pub mod config;
pub mod mcp;
pub mod models;
pub mod observability;
pub mod workspace;

// Re-exports for convenience
pub use access::{AccessResolver, ResolutionCache, RootSet, extract_page_id_from_request};
pub use config::{AccessSettings, ApiSettings, GateConfig};
pub use models::{CacheEntry, ParentLink, ResourceId, ResourceKind};
pub use workspace::{ApiExecutor, HttpWorkspaceClient, Operation};

/// Error type for pagegate operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidIdentifier` | Id is not 32 hex digits after stripping hyphens |
/// | `InvalidUrl` | URL has no trailing id segment |
/// | `UpstreamLookupFailed` | Workspace API call fails during parent resolution |
/// | `ChainTooDeep` | Block parent chain exceeds the traversal depth bound |
/// | `AccessDenied` | A proxied tool call touches a resource outside the root scope |
/// | `InvalidInput` | Missing or malformed parameters in MCP tool calls |
/// | `OperationFailed` | Config parsing, client construction, or serve-loop I/O fails |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Resource identifier failed syntactic validation.
    ///
    /// Raised when:
    /// - A caller passes an id that is not 32 hex digits once hyphens are removed
    /// - A configured root id is malformed (logged and skipped at build time)
    ///
    /// This is always fail-fast; malformed ids are never silently coerced.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Root page URL did not contain an extractable identifier.
    ///
    /// Raised when:
    /// - A configured root URL has no 32-hex-digit trailing segment
    ///
    /// At configuration time the offending entry is logged and skipped;
    /// root-set construction continues with the remaining entries.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// A workspace API lookup failed during parent resolution.
    ///
    /// Raised when:
    /// - The HTTP request errors or times out
    /// - The API returns a non-success status
    /// - The response body is not valid JSON
    ///
    /// The in-flight hierarchy walk terminates and the queried resource is
    /// cached and reported as not allowed. Lookups are never retried here.
    #[error("upstream lookup '{operation}' failed: {cause}")]
    UpstreamLookupFailed {
        /// The metadata operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Block parent chain exceeded the traversal depth bound.
    ///
    /// Raised when:
    /// - Block-to-block parent links nest deeper than the limit, which on
    ///   real data indicates corruption or an adversarial graph
    ///
    /// Treated like a lookup failure: the walk stops and denies.
    #[error("parent chain for '{resource}' exceeds {limit} hops")]
    ChainTooDeep {
        /// The resource whose chain was being followed.
        resource: String,
        /// The depth bound that was hit.
        limit: usize,
    },

    /// A proxied tool call was denied by the access resolver.
    ///
    /// Raised when:
    /// - The resource is outside the configured root scope
    /// - The resolver could not affirmatively prove access (fail closed)
    #[error("access denied for resource '{resource}'")]
    AccessDenied {
        /// The resource that was denied.
        resource: String,
    },

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - Required tool-call parameters are missing
    /// - JSON deserialization fails in MCP handlers
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - The config file cannot be read or parsed
    /// - The HTTP client cannot be constructed
    /// - The serve loop fails reading stdin or writing stdout
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for pagegate operations.
pub type Result<T> = std::result::Result<T, Error>;
