//! Operation-execution capability.

use super::Operation;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Executes workspace API operations.
///
/// This is the single capability the access resolver and the MCP proxy
/// depend on. Identical inputs against an unchanged remote state yield
/// identical outputs; implementations perform no local mutation.
///
/// # Implementor Notes
///
/// - Methods use `&self` to enable sharing via `Arc<dyn ApiExecutor>`
/// - Failures surface as [`crate::Error::UpstreamLookupFailed`]; the
///   resolver never retries, so implementations own any retry policy
/// - Timeouts and cancellation are the implementation's responsibility
#[async_trait]
pub trait ApiExecutor: Send + Sync {
    /// Executes one operation and returns the response data as JSON.
    ///
    /// `path_params` supplies a value for every placeholder named in
    /// [`Operation::path_params`]; `body` is the JSON request body for
    /// methods that carry one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UpstreamLookupFailed`] if the call fails or
    /// the response is not usable.
    async fn execute(
        &self,
        operation: &Operation,
        path_params: &HashMap<String, String>,
        body: Option<&Value>,
    ) -> Result<Value>;
}
