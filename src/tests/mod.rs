//! Test utilities and common fixtures for client tests

use serde_json::{json, Value};
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

use crate::{api::SysmlApi, config::ClientConfig};


pub const TEST_TOKEN: &str = "Bearer FAKE_TOKEN_12345";
pub const TEST_PROJECT_ID: &str = "test_proj_1";
pub const TEST_ELEMENT_ID: &str = "elem_abc";

/// Sample collection response wrapped under the `elements` key
pub fn projects_wrapped_response() -> Value {
    json!({
        "elements": [
            {"id": "proj1", "name": "Project 1"},
            {"id": "proj2"}
        ]
    })
}

/// Sample element object response
pub fn element_response() -> Value {
    json!({
        "id": TEST_ELEMENT_ID,
        "name": "Test Element",
        "type": "Block"
    })
}

/// Error body in the server's JSON error format
pub fn error_response(message: &str) -> Value {
    json!({ "error": message })
}

/// Mock HTTP server harness for exercising the blocking client
///
/// Owns a tokio runtime so wiremock's async setup can be driven from plain
/// `#[test]` functions; the server keeps serving on the runtime's worker
/// threads while the test thread issues blocking requests. `server` is
/// declared first so it shuts down before the runtime goes away.
pub struct MockApi {
    pub server: MockServer,
    rt: Runtime,
}

impl MockApi {
    /// Start a new mock server
    pub fn start() -> Self {
        let rt = Runtime::new().expect("failed to create tokio runtime");
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    /// Mount a mock on the server
    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    /// Get the base URL of the mock server
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Create a test config pointing to this mock server
    pub fn test_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url(), TEST_TOKEN)
    }

    /// Create an API client pointing to this mock server
    pub fn api(&self) -> SysmlApi {
        SysmlApi::new(self.test_config()).expect("failed to create client")
    }
}

#[cfg(test)]
mod fixture_tests {
    use super::*;

    #[test]
    fn test_sample_responses() {
        let projects = projects_wrapped_response();
        assert_eq!(projects["elements"][0]["id"], "proj1");

        let element = element_response();
        assert_eq!(element["id"], TEST_ELEMENT_ID);

        let error = error_response("Missing description");
        assert_eq!(error["error"], "Missing description");
    }
}
