//! Mapping inbound request shapes to the resource id requiring a verdict.

use serde_json::{Map, Value};

/// Extracts the resource id an inbound request must be authorized against.
///
/// Mapping rules, in order:
///
/// - a path containing `/pages/` with a `page_id` parameter yields that id;
/// - a path containing `/blocks/` with a `block_id` parameter yields that id
///   (a page-or-block candidate, classified later by the kind probe);
/// - a database query path (`/databases/` + `/query`) with a `database_id`
///   parameter yields that id;
/// - a page-creation path (`/pages` with no id segment) with a `parent`
///   parameter yields `parent.page_id`, or `parent.database_id` when the
///   new page lands in a database.
///
/// `None` means no access-control decision is required for the request.
#[must_use]
pub fn extract_page_id_from_request(path: &str, params: &Map<String, Value>) -> Option<String> {
    let param_str = |key: &str| params.get(key).and_then(Value::as_str).map(str::to_string);

    if path.contains("/pages/") {
        return param_str("page_id");
    }
    if path.contains("/blocks/") {
        return param_str("block_id");
    }
    if path.contains("/databases/") && path.contains("/query") {
        return param_str("database_id");
    }
    if path.contains("/pages") {
        let parent = params.get("parent")?;
        return parent
            .get("page_id")
            .or_else(|| parent.get("database_id"))
            .and_then(Value::as_str)
            .map(str::to_string);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    const ID: &str = "1a2b3c4d-5e6f-7a8b-9c0d-1e2f3a4b5c6d";

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test_case("/pages/{page_id}", json!({ "page_id": ID }), Some(ID); "page retrieval")]
    #[test_case("/blocks/{block_id}/children", json!({ "block_id": ID }), Some(ID); "block children")]
    #[test_case("/databases/{database_id}/query", json!({ "database_id": ID }), Some(ID); "database query")]
    #[test_case("/databases/{database_id}", json!({ "database_id": ID }), None; "database retrieval needs no verdict")]
    #[test_case("/search", json!({ "query": "q" }), None; "unrelated path")]
    fn test_extraction(path: &str, params: Value, expected: Option<&str>) {
        assert_eq!(
            extract_page_id_from_request(path, &obj(params)),
            expected.map(str::to_string)
        );
    }

    #[test]
    fn test_page_creation_page_parent() {
        let params = obj(json!({ "parent": { "page_id": ID }, "properties": {} }));
        assert_eq!(
            extract_page_id_from_request("/pages", &params),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_page_creation_database_parent() {
        let params = obj(json!({ "parent": { "database_id": ID } }));
        assert_eq!(
            extract_page_id_from_request("/pages", &params),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_page_creation_without_parent() {
        let params = obj(json!({ "properties": {} }));
        assert_eq!(extract_page_id_from_request("/pages", &params), None);
    }

    #[test]
    fn test_missing_param_yields_none() {
        let params = obj(json!({}));
        assert_eq!(
            extract_page_id_from_request("/pages/{page_id}", &params),
            None
        );
    }
}
