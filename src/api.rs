//! Core HTTP client for the SysML v2 repository API

use compact_str::format_compact;
use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method, StatusCode,
};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::{
    config::{ClientConfig, RelationDirection},
    error::{ClientError, Result},
};

/// Commit used when an operation does not name one explicitly.
const DEFAULT_COMMIT: &str = "main";

/// Blocking HTTP client for a SysML v2 repository API
///
/// Every operation issues exactly one request and maps the response through
/// a single classification ladder, so all endpoints share identical error
/// semantics.
#[derive(Debug, Clone)]
pub struct SysmlApi {
    http: Client,
    config: ClientConfig,
}

impl SysmlApi {
    /// Create a new API client
    ///
    /// Validates the configuration and builds the transport up front;
    /// nothing touches the network until the first operation is called.
    pub fn new(mut config: ClientConfig) -> Result<Self> {
        config.validate()?;

        // Only a single trailing slash is removed; anything beyond that is
        // part of the configured URL.
        if let Some(stripped) = config.base_url.strip_suffix('/') {
            config.base_url = stripped.into();
        }

        let mut headers = HeaderMap::new();
        let authorization = HeaderValue::from_str(&config.bearer_token).map_err(|_| {
            ClientError::config("bearer_token contains characters not permitted in a header value")
        })?;
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::config(format!("failed to build HTTP transport: {e}")))?;

        Ok(Self { http, config })
    }

    /// Get the effective base URL (trailing slash stripped)
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get all projects
    #[instrument(skip(self))]
    pub fn get_projects(&self) -> Result<Vec<Value>> {
        self.get_collection("/projects")
    }

    /// Create a new project
    #[instrument(skip(self, project))]
    pub fn create_project(&self, project: &Value) -> Result<Value> {
        self.request(Method::POST, "/projects", None, Some(project), StatusCode::OK)
    }

    /// Get a project by id
    #[instrument(skip(self))]
    pub fn get_project(&self, project_id: &str) -> Result<Value> {
        self.get_json(&format_compact!("/projects/{project_id}"))
    }

    /// Get a specific element from a commit within a project
    ///
    /// `commit_id` defaults to `"main"` when omitted.
    #[instrument(skip(self))]
    pub fn get_element(
        &self,
        project_id: &str,
        element_id: &str,
        commit_id: Option<&str>,
    ) -> Result<Value> {
        let commit = commit_id.unwrap_or(DEFAULT_COMMIT);
        self.get_json(&format_compact!(
            "/projects/{project_id}/commits/{commit}/elements/{element_id}"
        ))
    }

    /// Get all elements in a commit
    #[instrument(skip(self))]
    pub fn get_elements(&self, project_id: &str, commit_id: Option<&str>) -> Result<Vec<Value>> {
        let commit = commit_id.unwrap_or(DEFAULT_COMMIT);
        self.get_collection(&format_compact!("/projects/{project_id}/commits/{commit}/elements"))
    }

    /// Get the elements owned by a specific element
    #[instrument(skip(self))]
    pub fn get_owned_elements(
        &self,
        project_id: &str,
        element_id: &str,
        commit_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        let commit = commit_id.unwrap_or(DEFAULT_COMMIT);
        self.get_collection(&format_compact!(
            "/projects/{project_id}/commits/{commit}/elements/{element_id}/owned"
        ))
    }

    /// Create a new element within a commit
    #[instrument(skip(self, element))]
    pub fn create_element(
        &self,
        project_id: &str,
        element: &Value,
        commit_id: Option<&str>,
    ) -> Result<Value> {
        let commit = commit_id.unwrap_or(DEFAULT_COMMIT);
        let endpoint = format_compact!("/projects/{project_id}/commits/{commit}/elements");
        self.request(Method::POST, &endpoint, None, Some(element), StatusCode::OK)
    }

    /// Update an existing element
    #[instrument(skip(self, element))]
    pub fn update_element(
        &self,
        project_id: &str,
        element_id: &str,
        element: &Value,
        commit_id: Option<&str>,
    ) -> Result<Value> {
        let commit = commit_id.unwrap_or(DEFAULT_COMMIT);
        let endpoint =
            format_compact!("/projects/{project_id}/commits/{commit}/elements/{element_id}");
        self.request(Method::PUT, &endpoint, None, Some(element), StatusCode::OK)
    }

    /// Delete an element from a commit
    #[instrument(skip(self))]
    pub fn delete_element(
        &self,
        project_id: &str,
        element_id: &str,
        commit_id: Option<&str>,
    ) -> Result<()> {
        let commit = commit_id.unwrap_or(DEFAULT_COMMIT);
        let endpoint =
            format_compact!("/projects/{project_id}/commits/{commit}/elements/{element_id}");
        self.request(Method::DELETE, &endpoint, None, None, StatusCode::NO_CONTENT)?;
        Ok(())
    }

    /// Create a new commit in a project
    #[instrument(skip(self, commit))]
    pub fn create_commit(&self, project_id: &str, commit: &Value) -> Result<Value> {
        let endpoint = format_compact!("/projects/{project_id}/commits");
        self.request(Method::POST, &endpoint, None, Some(commit), StatusCode::OK)
    }

    /// Get a commit by id
    #[instrument(skip(self))]
    pub fn get_commit(&self, project_id: &str, commit_id: &str) -> Result<Value> {
        self.get_json(&format_compact!("/projects/{project_id}/commits/{commit_id}"))
    }

    /// Get all commits of a project
    #[instrument(skip(self))]
    pub fn get_commits(&self, project_id: &str) -> Result<Vec<Value>> {
        self.get_collection(&format_compact!("/projects/{project_id}/commits"))
    }

    /// Get all branches of a project
    #[instrument(skip(self))]
    pub fn get_branches(&self, project_id: &str) -> Result<Vec<Value>> {
        self.get_collection(&format_compact!("/projects/{project_id}/branches"))
    }

    /// Create a new branch
    #[instrument(skip(self, branch))]
    pub fn create_branch(&self, project_id: &str, branch: &Value) -> Result<Value> {
        let endpoint = format_compact!("/projects/{project_id}/branches");
        self.request(Method::POST, &endpoint, None, Some(branch), StatusCode::OK)
    }

    /// Get a branch by id
    #[instrument(skip(self))]
    pub fn get_branch(&self, project_id: &str, branch_id: &str) -> Result<Value> {
        self.get_json(&format_compact!("/projects/{project_id}/branches/{branch_id}"))
    }

    /// Delete a branch
    #[instrument(skip(self))]
    pub fn delete_branch(&self, project_id: &str, branch_id: &str) -> Result<()> {
        let endpoint = format_compact!("/projects/{project_id}/branches/{branch_id}");
        self.request(Method::DELETE, &endpoint, None, None, StatusCode::NO_CONTENT)?;
        Ok(())
    }

    /// Get all tags of a project
    #[instrument(skip(self))]
    pub fn get_tags(&self, project_id: &str) -> Result<Vec<Value>> {
        self.get_collection(&format_compact!("/projects/{project_id}/tags"))
    }

    /// Create a new tag
    #[instrument(skip(self, tag))]
    pub fn create_tag(&self, project_id: &str, tag: &Value) -> Result<Value> {
        let endpoint = format_compact!("/projects/{project_id}/tags");
        self.request(Method::POST, &endpoint, None, Some(tag), StatusCode::OK)
    }

    /// Get a tag by id
    #[instrument(skip(self))]
    pub fn get_tag(&self, project_id: &str, tag_id: &str) -> Result<Value> {
        self.get_json(&format_compact!("/projects/{project_id}/tags/{tag_id}"))
    }

    /// Delete a tag
    #[instrument(skip(self))]
    pub fn delete_tag(&self, project_id: &str, tag_id: &str) -> Result<()> {
        let endpoint = format_compact!("/projects/{project_id}/tags/{tag_id}");
        self.request(Method::DELETE, &endpoint, None, None, StatusCode::NO_CONTENT)?;
        Ok(())
    }

    /// Get the relationships of an element
    ///
    /// The `direction` query parameter is always sent; `None` means both
    /// directions.
    #[instrument(skip(self))]
    pub fn get_relationships(
        &self,
        project_id: &str,
        element_id: &str,
        commit_id: Option<&str>,
        direction: Option<RelationDirection>,
    ) -> Result<Vec<Value>> {
        let commit = commit_id.unwrap_or(DEFAULT_COMMIT);
        let endpoint = format_compact!(
            "/projects/{project_id}/commits/{commit}/elements/{element_id}/relationships"
        );
        let direction = direction.unwrap_or_default();

        let value = self.request(
            Method::GET,
            &endpoint,
            Some(&[("direction", direction.as_str())]),
            None,
            StatusCode::OK,
        )?;
        Ok(into_elements(value))
    }

    /// Validate server reachability and credentials
    #[instrument(skip(self))]
    pub fn validate_connection(&self) -> Result<()> {
        self.get_projects().map(|_| ())
    }

    // Private helper methods

    /// Perform a GET request expecting a JSON object
    fn get_json(&self, endpoint: &str) -> Result<Value> {
        self.request(Method::GET, endpoint, None, None, StatusCode::OK)
    }

    /// Perform a GET request against a collection endpoint
    fn get_collection(&self, endpoint: &str) -> Result<Vec<Value>> {
        let items = into_elements(self.get_json(endpoint)?);
        debug!(count = items.len(), endpoint, "fetched collection");
        Ok(items)
    }

    /// Issue a request and classify the response
    ///
    /// Status-specific checks run before the generic expected-status check,
    /// so a 404 on a DELETE is `NotFound`, not `Api`.
    fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
        body: Option<&Value>,
        expected: StatusCode,
    ) -> Result<Value> {
        let url = format_compact!("{}{}", self.config.base_url, endpoint);

        let mut request = self.http.request(method.clone(), url.as_str());
        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .map_err(|e| ClientError::transport(url.as_str(), e))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| ClientError::transport(url.as_str(), e))?;

        debug!(status = status.as_u16(), %url, "response received");

        match status.as_u16() {
            401 | 403 => Err(ClientError::Authentication {
                status: status.as_u16(),
                body: text,
            }),
            404 => Err(ClientError::NotFound {
                endpoint: endpoint.to_string(),
                body: text,
            }),
            400 => {
                let detail = match serde_json::from_str::<Value>(&text) {
                    Ok(parsed) => parsed.to_string(),
                    Err(_) => text,
                };
                Err(ClientError::BadRequest { endpoint: endpoint.to_string(), detail })
            },
            409 => Err(ClientError::Conflict {
                endpoint: endpoint.to_string(),
                body: text,
            }),
            code if code != expected.as_u16() => Err(ClientError::Api {
                status: code,
                method: method.to_string(),
                endpoint: endpoint.to_string(),
                body: text,
            }),
            _ => {
                if status == StatusCode::NO_CONTENT || text.is_empty() {
                    return Ok(Value::Object(Map::new()));
                }
                serde_json::from_str(&text).map_err(|e| ClientError::decode(url.as_str(), &text, e))
            },
        }
    }
}

/// Coerce a collection response to a plain sequence
///
/// Collection endpoints are inconsistent about wrapping: some return a bare
/// array, others wrap it under an `"elements"` key. Anything unrecognized
/// collapses to an empty sequence rather than an error.
fn into_elements(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut wrapper) => match wrapper.remove("elements") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
