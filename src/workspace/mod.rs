//! Workspace API boundary.
//!
//! The resolver and the MCP proxy consume the workspace API through a single
//! operation-execution capability: an [`Operation`] descriptor (method plus
//! path template) handed to an [`ApiExecutor`]. The production executor is
//! [`HttpWorkspaceClient`]; tests substitute a scripted mock.

mod client;
mod executor;
mod operations;

pub use client::HttpWorkspaceClient;
pub use executor::ApiExecutor;
pub use operations::{
    APPEND_BLOCK_CHILDREN, CREATE_PAGE, Operation, QUERY_DATABASE, RETRIEVE_BLOCK,
    RETRIEVE_BLOCK_CHILDREN, RETRIEVE_DATABASE, RETRIEVE_PAGE,
};
