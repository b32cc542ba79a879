//! Resource identifiers and parent links.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

/// Trailing id segment of a workspace URL: 32 hex digits, with or without
/// the standard 8-4-4-4-12 hyphenation, optionally followed by a query
/// string or fragment.
static URL_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([0-9a-fA-F]{8}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{12})(?:[?#].*)?$",
    )
    .expect("static regex: url id suffix pattern")
});

/// Canonical identifier for a workspace resource.
///
/// Always the 36-character hyphenated UUID form (8-4-4-4-12, lowercase hex).
/// Any id that enters the verdict cache or the root set is in this form;
/// no other representation is ever stored or compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Parses a raw identifier into canonical form.
    ///
    /// Accepts hyphenated, unhyphenated, and arbitrarily-hyphenated input;
    /// case-insensitive. The canonical form re-inserts hyphens at offsets
    /// 8, 4, 4, 4, 12.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] unless the input is exactly
    /// 32 hexadecimal characters after removing all hyphens.
    pub fn parse(raw: &str) -> Result<Self> {
        let stripped: String = raw
            .chars()
            .filter(|&c| c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if stripped.len() != 32 || !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidIdentifier(raw.to_string()));
        }

        let uuid = uuid::Uuid::try_parse(&stripped)
            .map_err(|_| Error::InvalidIdentifier(raw.to_string()))?;

        Ok(Self(uuid.hyphenated().to_string()))
    }

    /// Extracts and canonicalizes the id from a workspace page URL.
    ///
    /// The id is the trailing segment of the URL path, e.g.
    /// `https://workspace.example.com/My-Page-1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL has no 32-hex-digit trailing
    /// segment, or [`Error::InvalidIdentifier`] if the extracted id fails
    /// validation.
    pub fn from_url(url: &str) -> Result<Self> {
        let captures = URL_ID_REGEX
            .captures(url)
            .ok_or_else(|| Error::InvalidUrl(url.to_string()))?;

        match captures.get(1) {
            Some(id) => Self::parse(id.as_str()),
            None => Err(Error::InvalidUrl(url.to_string())),
        }
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind a workspace resource is assumed to have for a typed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A page.
    Page,
    /// A database.
    Database,
    /// A block.
    Block,
}

impl ResourceKind {
    /// Returns the kind name as used in API paths and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Database => "database",
            Self::Block => "block",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The immediate declared container of a resource.
///
/// Parsed from the `parent` field of a metadata response. An absent, null,
/// or workspace-level parent is represented as `None` at the call site;
/// a resource without a parent link is a hierarchy root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentLink {
    /// Contained directly in a page.
    Page(ResourceId),
    /// Contained in a database.
    Database(ResourceId),
    /// Contained in a block.
    Block(ResourceId),
}

impl ParentLink {
    /// Parses the `parent` field of a metadata response.
    ///
    /// Returns `Ok(None)` when the field is absent, null, or names a
    /// workspace-level parent. Unknown parent types also resolve to `None`
    /// rather than an error; the walker treats them as the top of the chain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the parent id is present but
    /// malformed.
    pub fn from_response(data: &Value) -> Result<Option<Self>> {
        let Some(parent) = data.get("parent") else {
            return Ok(None);
        };
        if parent.is_null() {
            return Ok(None);
        }

        let parent_type = parent.get("type").and_then(Value::as_str).unwrap_or("");
        let link = match parent_type {
            "page_id" => parent
                .get("page_id")
                .and_then(Value::as_str)
                .map(|id| ResourceId::parse(id).map(Self::Page)),
            "database_id" => parent
                .get("database_id")
                .and_then(Value::as_str)
                .map(|id| ResourceId::parse(id).map(Self::Database)),
            "block_id" => parent
                .get("block_id")
                .and_then(Value::as_str)
                .map(|id| ResourceId::parse(id).map(Self::Block)),
            _ => None,
        };

        link.transpose()
    }
}

/// Memoized resolution verdict for a single resource.
///
/// Created the first time a resource is resolved, either as a definitive
/// answer or as an intermediate node visited on the way to one. Never
/// evicted automatically; only an explicit cache reset removes entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The structural parent this resource resolved through, when known.
    pub parent_id: Option<ResourceId>,
    /// Whether the resource is inside the allowed root scope.
    pub is_allowed: bool,
}
