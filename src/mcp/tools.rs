//! MCP tool implementations.
//!
//! Each tool proxies one workspace API operation. The registry is static:
//! tools are defined here with their JSON schemas and the operation they
//! execute, and every listed operation's path shape is covered by the
//! request extractor so the access guard sees each call.

use crate::workspace::{
    APPEND_BLOCK_CHILDREN, CREATE_PAGE, Operation, QUERY_DATABASE, RETRIEVE_BLOCK_CHILDREN,
    RETRIEVE_PAGE,
};
use serde_json::{Value, json};
use std::collections::HashMap;

/// Definition of a single MCP tool.
pub struct ToolDefinition {
    /// Tool name as exposed over the protocol.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON schema for the tool's arguments.
    pub input_schema: Value,
    /// The workspace operation this tool executes.
    pub operation: &'static Operation,
}

/// Registry of MCP tools.
pub struct ToolRegistry {
    /// Available tools.
    tools: HashMap<String, ToolDefinition>,
}

impl ToolRegistry {
    /// Creates a new tool registry with all pagegate tools.
    #[must_use]
    pub fn new() -> Self {
        let mut tools = HashMap::new();

        tools.insert(
            "workspace_retrieve_page".to_string(),
            ToolDefinition {
                name: "workspace_retrieve_page".to_string(),
                description: "Retrieve a page's properties and metadata by id".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "page_id": {
                            "type": "string",
                            "description": "Id of the page to retrieve (UUID, with or without hyphens)"
                        }
                    },
                    "required": ["page_id"]
                }),
                operation: &RETRIEVE_PAGE,
            },
        );

        tools.insert(
            "workspace_retrieve_block_children".to_string(),
            ToolDefinition {
                name: "workspace_retrieve_block_children".to_string(),
                description: "List the child blocks of a page or block".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "block_id": {
                            "type": "string",
                            "description": "Id of the parent page or block (UUID)"
                        }
                    },
                    "required": ["block_id"]
                }),
                operation: &RETRIEVE_BLOCK_CHILDREN,
            },
        );

        tools.insert(
            "workspace_query_database".to_string(),
            ToolDefinition {
                name: "workspace_query_database".to_string(),
                description: "Query a database with optional filter and sorts".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "database_id": {
                            "type": "string",
                            "description": "Id of the database to query (UUID)"
                        },
                        "filter": {
                            "type": "object",
                            "description": "Optional filter condition"
                        },
                        "sorts": {
                            "type": "array",
                            "items": { "type": "object" },
                            "description": "Optional sort directives"
                        },
                        "page_size": {
                            "type": "integer",
                            "description": "Maximum number of results",
                            "minimum": 1,
                            "maximum": 100
                        }
                    },
                    "required": ["database_id"]
                }),
                operation: &QUERY_DATABASE,
            },
        );

        tools.insert(
            "workspace_create_page".to_string(),
            ToolDefinition {
                name: "workspace_create_page".to_string(),
                description: "Create a page under a page or database parent".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "parent": {
                            "type": "object",
                            "description": "Parent reference: { \"page_id\": … } or { \"database_id\": … }"
                        },
                        "properties": {
                            "type": "object",
                            "description": "Property values for the new page"
                        },
                        "children": {
                            "type": "array",
                            "items": { "type": "object" },
                            "description": "Optional initial content blocks"
                        }
                    },
                    "required": ["parent", "properties"]
                }),
                operation: &CREATE_PAGE,
            },
        );

        tools.insert(
            "workspace_append_block_children".to_string(),
            ToolDefinition {
                name: "workspace_append_block_children".to_string(),
                description: "Append content blocks to a page or block".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "block_id": {
                            "type": "string",
                            "description": "Id of the parent page or block (UUID)"
                        },
                        "children": {
                            "type": "array",
                            "items": { "type": "object" },
                            "description": "Blocks to append"
                        }
                    },
                    "required": ["block_id", "children"]
                }),
                operation: &APPEND_BLOCK_CHILDREN,
            },
        );

        Self { tools }
    }

    /// Looks up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// Lists all tools, sorted by name for stable protocol output.
    #[must_use]
    pub fn list(&self) -> Vec<&ToolDefinition> {
        let mut tools: Vec<&ToolDefinition> = self.tools.values().collect();
        tools.sort_by_key(|t| t.name.as_str());
        tools
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
