//! Workspace API operation descriptors.

/// A single workspace API operation.
///
/// Descriptors are static: a method, a path template with `{param}`
/// placeholders, and the names of those placeholders in order. The
/// executor substitutes path parameters and performs the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Stable operation name, used in errors and logs.
    pub name: &'static str,
    /// HTTP method.
    pub method: &'static str,
    /// Path template relative to the API endpoint.
    pub path: &'static str,
    /// Names of the `{param}` placeholders in `path`.
    pub path_params: &'static [&'static str],
}

/// Retrieves a page by id.
pub const RETRIEVE_PAGE: Operation = Operation {
    name: "retrieve_page",
    method: "GET",
    path: "/pages/{page_id}",
    path_params: &["page_id"],
};

/// Retrieves a database by id.
pub const RETRIEVE_DATABASE: Operation = Operation {
    name: "retrieve_database",
    method: "GET",
    path: "/databases/{database_id}",
    path_params: &["database_id"],
};

/// Retrieves a block by id.
pub const RETRIEVE_BLOCK: Operation = Operation {
    name: "retrieve_block",
    method: "GET",
    path: "/blocks/{block_id}",
    path_params: &["block_id"],
};

/// Lists the child blocks of a block or page.
pub const RETRIEVE_BLOCK_CHILDREN: Operation = Operation {
    name: "retrieve_block_children",
    method: "GET",
    path: "/blocks/{block_id}/children",
    path_params: &["block_id"],
};

/// Runs a filtered/sorted query against a database.
pub const QUERY_DATABASE: Operation = Operation {
    name: "query_database",
    method: "POST",
    path: "/databases/{database_id}/query",
    path_params: &["database_id"],
};

/// Creates a page under a page or database parent.
pub const CREATE_PAGE: Operation = Operation {
    name: "create_page",
    method: "POST",
    path: "/pages",
    path_params: &[],
};

/// Appends child blocks to a block or page.
pub const APPEND_BLOCK_CHILDREN: Operation = Operation {
    name: "append_block_children",
    method: "PATCH",
    path: "/blocks/{block_id}/children",
    path_params: &["block_id"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_params_match_placeholders() {
        for op in [
            RETRIEVE_PAGE,
            RETRIEVE_DATABASE,
            RETRIEVE_BLOCK,
            RETRIEVE_BLOCK_CHILDREN,
            QUERY_DATABASE,
            CREATE_PAGE,
            APPEND_BLOCK_CHILDREN,
        ] {
            for param in op.path_params {
                assert!(
                    op.path.contains(&format!("{{{param}}}")),
                    "{} missing placeholder {{{param}}}",
                    op.name
                );
            }
        }
    }
}
