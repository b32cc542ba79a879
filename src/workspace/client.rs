//! HTTP workspace API client.

use super::{ApiExecutor, Operation};
use crate::config::ApiSettings;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Minimum plausible token length; shorter values are rejected early.
const MIN_TOKEN_LENGTH: usize = 30;

/// Substitutes `{param}` placeholders in a path template.
///
/// Every placeholder named by the operation must be supplied; extra map
/// entries are ignored.
fn substitute_path(
    operation: &Operation,
    path_params: &HashMap<String, String>,
) -> Result<String> {
    let mut path = operation.path.to_string();
    for param in operation.path_params {
        let value = path_params
            .get(*param)
            .ok_or_else(|| Error::InvalidInput(format!("missing path parameter '{param}'")))?;
        path = path.replace(&format!("{{{param}}}"), value);
    }
    Ok(path)
}

/// Workspace API client over HTTPS.
///
/// Calls a Notion-compatible REST API: bearer-token auth plus a dated
/// version header, JSON in and out.
pub struct HttpWorkspaceClient {
    /// Bearer token.
    token: Option<String>,
    /// API endpoint.
    endpoint: String,
    /// API version header value.
    version: String,
    /// HTTP client.
    client: reqwest::Client,
}

impl HttpWorkspaceClient {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.notion.com/v1";

    /// Default API version header value.
    pub const DEFAULT_VERSION: &'static str = "2022-06-28";

    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a client from API settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(settings: &ApiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::OperationFailed {
                operation: "build_http_client".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self {
            token: settings.token.clone(),
            endpoint: settings.endpoint.clone(),
            version: settings.version.clone(),
            client,
        })
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Validates that the client is configured with a plausible token.
    ///
    /// Catches obviously malformed tokens early, before making network
    /// requests that would fail with 401 errors.
    fn validate(&self) -> Result<&str> {
        let token = self.token.as_deref().ok_or_else(|| Error::OperationFailed {
            operation: "workspace_request".to_string(),
            cause: "API token not set".to_string(),
        })?;

        if !Self::is_valid_token_format(token) {
            return Err(Error::OperationFailed {
                operation: "workspace_request".to_string(),
                cause: "invalid API token format".to_string(),
            });
        }

        Ok(token)
    }

    /// Checks if a token has a valid format.
    ///
    /// Integration tokens start with `secret_` or `ntn_` and are well over
    /// thirty characters; anything else is rejected without a request.
    fn is_valid_token_format(token: &str) -> bool {
        token.len() >= MIN_TOKEN_LENGTH
            && (token.starts_with("secret_") || token.starts_with("ntn_"))
            && token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

#[async_trait]
impl ApiExecutor for HttpWorkspaceClient {
    async fn execute(
        &self,
        operation: &Operation,
        path_params: &HashMap<String, String>,
        body: Option<&Value>,
    ) -> Result<Value> {
        let token = self.validate()?;
        let path = substitute_path(operation, path_params)?;
        let url = format!("{}{path}", self.endpoint);

        let method = reqwest::Method::from_bytes(operation.method.as_bytes()).map_err(|_| {
            Error::OperationFailed {
                operation: operation.name.to_string(),
                cause: format!("unsupported method '{}'", operation.method),
            }
        })?;

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(token)
            .header("Notion-Version", &self.version);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::UpstreamLookupFailed {
                operation: operation.name.to_string(),
                cause: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::debug!(
                operation = operation.name,
                status = status.as_u16(),
                "workspace API call failed"
            );
            return Err(Error::UpstreamLookupFailed {
                operation: operation.name.to_string(),
                cause: format!("status {status}: {detail}"),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::UpstreamLookupFailed {
                operation: operation.name.to_string(),
                cause: format!("invalid response body: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::{CREATE_PAGE, RETRIEVE_PAGE};

    fn params(key: &str, value: &str) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert(key.to_string(), value.to_string());
        map
    }

    #[test]
    fn test_substitute_path() {
        let path = substitute_path(
            &RETRIEVE_PAGE,
            &params("page_id", "1a2b3c4d-5e6f-7a8b-9c0d-1e2f3a4b5c6d"),
        )
        .unwrap();
        assert_eq!(path, "/pages/1a2b3c4d-5e6f-7a8b-9c0d-1e2f3a4b5c6d");
    }

    #[test]
    fn test_substitute_path_missing_param() {
        let result = substitute_path(&RETRIEVE_PAGE, &HashMap::new());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_substitute_path_no_params() {
        let path = substitute_path(&CREATE_PAGE, &HashMap::new()).unwrap();
        assert_eq!(path, "/pages");
    }

    #[test]
    fn test_token_format() {
        assert!(HttpWorkspaceClient::is_valid_token_format(
            "secret_0123456789abcdef0123456789abcdef"
        ));
        assert!(HttpWorkspaceClient::is_valid_token_format(
            "ntn_0123456789abcdef0123456789abcdef"
        ));
        assert!(!HttpWorkspaceClient::is_valid_token_format("secret_short"));
        assert!(!HttpWorkspaceClient::is_valid_token_format(
            "0123456789abcdef0123456789abcdef"
        ));
    }
}
