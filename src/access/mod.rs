//! Hierarchical access resolution.
//!
//! The resolver decides whether a resource is inside the configured root
//! scope by walking its remote parent chain toward a root page, memoizing
//! every verdict along the way:
//!
//! ```text
//! request path + params
//!   └─ extract_page_id_from_request
//!        └─ AccessResolver::is_page_allowed
//!             ├─ RootSet membership
//!             ├─ ResolutionCache lookup
//!             └─ kind probe → parent chain walk → cache fill
//! ```
//!
//! All ambiguity and every upstream failure fail closed: the resolver never
//! grants access it cannot affirmatively prove.

mod cache;
mod request;
mod resolver;
mod roots;

pub use cache::ResolutionCache;
pub use request::extract_page_id_from_request;
pub use resolver::AccessResolver;
pub use roots::RootSet;
