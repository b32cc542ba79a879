//! Serve CLI command (MCP server).

use crate::access::{AccessResolver, RootSet};
use crate::config::GateConfig;
use crate::mcp::McpServer;
use crate::workspace::{ApiExecutor, HttpWorkspaceClient};
use crate::Result;
use std::sync::Arc;

/// Serve command handler.
pub struct ServeCommand;

impl ServeCommand {
    /// Runs the MCP server over stdio until the client disconnects.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed or the
    /// serve loop fails on transport I/O.
    pub async fn run(config: &GateConfig) -> Result<()> {
        let executor: Arc<dyn ApiExecutor> =
            Arc::new(HttpWorkspaceClient::from_config(&config.api)?);

        let roots = RootSet::build(&config.access);
        if roots.is_enabled() {
            tracing::info!(roots = roots.len(), "access control enabled");
        } else {
            tracing::warn!("no root pages configured, access control disabled");
        }

        let resolver = Arc::new(AccessResolver::new(roots, Arc::clone(&executor)));
        let server = McpServer::new(resolver, executor);
        server.run_stdio().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_command_is_constructible() {
        let _cmd = ServeCommand;
    }
}
