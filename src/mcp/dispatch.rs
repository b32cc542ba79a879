//! MCP method dispatch using command pattern.
//!
//! Replaces string matching in the serve loop with type-safe enum variants.
//! To add a new method: add a variant, update [`McpMethod::from_name`], and
//! add a handler arm in the server's dispatch.

use std::fmt;

/// MCP method identifier.
///
/// Represents the supported MCP protocol methods with type-safe variants.
/// Unknown methods are captured for proper error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum McpMethod {
    /// Initialize the MCP session.
    Initialize,
    /// Client acknowledgement after initialize (notification, no response).
    Initialized,
    /// List available tools.
    ListTools,
    /// Call a specific tool.
    CallTool,
    /// Ping the server (health check).
    Ping,
    /// Unknown method (for error handling).
    Unknown(String),
}

impl McpMethod {
    /// Parses a protocol method name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "initialize" => Self::Initialize,
            "notifications/initialized" => Self::Initialized,
            "tools/list" => Self::ListTools,
            "tools/call" => Self::CallTool,
            "ping" => Self::Ping,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the MCP protocol method name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Initialize => "initialize",
            Self::Initialized => "notifications/initialized",
            Self::ListTools => "tools/list",
            Self::CallTool => "tools/call",
            Self::Ping => "ping",
            Self::Unknown(name) => name,
        }
    }

    /// Whether this method is a notification (expects no response).
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        matches!(self, Self::Initialized)
    }
}

impl fmt::Display for McpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
