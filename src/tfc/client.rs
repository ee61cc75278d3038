//! HCP Terraform HTTP client for API interactions

use std::fmt;
use std::time::Duration;

use log::debug;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::config::{api, defaults};
use crate::error::{Result, TfcError};

use super::auth::{Authenticator, BearerToken};
use super::pagination::QueryParam;
use super::transport::{ApiRequest, ReqwestTransport, Transport};

/// Longest raw error body quoted in a status error
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Explicit per-invocation client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// Scheme and host, e.g. `https://app.terraform.io`
    pub base_url: String,
    pub api_version: String,
    pub token: String,
    pub timeout: Duration,
    pub verify_tls: bool,
    /// Optional `User-Agent` header
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Configuration for the default host with default timeout and TLS verification
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: api::DEFAULT_URL.to_string(),
            api_version: api::VERSION.to_string(),
            token: token.into(),
            timeout: Duration::from_secs(defaults::CONNECTION_TIMEOUT_SECS),
            verify_tls: true,
            user_agent: None,
        }
    }

    /// Override the base URL; `None` keeps the default host
    pub fn base_url(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url {
            self.base_url = url.to_string();
        }
        self
    }

    pub fn api_version(mut self, version: &str) -> Self {
        self.api_version = version.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn user_agent(mut self, agent: Option<&str>) -> Self {
        self.user_agent = agent.map(str::to_string);
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("verify_tls", &self.verify_tls)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Check that a base URL uses an HTTP scheme (case-insensitive)
pub fn validate_base_url(url: &str) -> Result<()> {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http:") || lower.starts_with("https:") {
        Ok(())
    } else {
        Err(TfcError::Config(format!(
            "url '{}' should either start with 'http' or 'https'.",
            url
        )))
    }
}

/// HCP Terraform API client
pub struct TfcClient<T = ReqwestTransport> {
    transport: T,
    auth: Box<dyn Authenticator>,
    /// `{base_url}/api/{version}`
    api_url: String,
    timeout: Duration,
    verify_tls: bool,
    user_agent: Option<String>,
}

impl TfcClient<ReqwestTransport> {
    /// Create a client backed by reqwest
    pub fn new(config: &ClientConfig) -> Result<Self> {
        validate_base_url(&config.base_url)?;
        Self::with_transport(config, ReqwestTransport::new()?)
    }
}

impl<T: Transport> TfcClient<T> {
    /// Create a client over an arbitrary transport
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self> {
        validate_base_url(&config.base_url)?;

        let api_url = format!(
            "{}/api/{}",
            config.base_url.trim_end_matches('/'),
            config.api_version
        );

        Ok(Self {
            transport,
            auth: Box::new(BearerToken::new(config.token.clone())),
            api_url,
            timeout: config.timeout,
            verify_tls: config.verify_tls,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Replace the bearer token authenticator
    pub fn with_authenticator(mut self, auth: impl Authenticator + 'static) -> Self {
        self.auth = Box::new(auth);
        self
    }

    /// Versioned API root, e.g. `https://app.terraform.io/api/v2`
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Absolute URL for a path; paths that are already URLs are used as is
    pub(crate) fn url_for(&self, path: &str) -> String {
        if path.starts_with("http:") || path.starts_with("https:") {
            path.to_string()
        } else {
            format!("{}{}", self.api_url, path)
        }
    }

    /// GET a path with optional query parameters
    pub async fn get(&self, path: &str, query: &[QueryParam]) -> Result<Value> {
        let url = append_query(self.url_for(path), query);
        self.execute(Method::GET, url, None).await
    }

    /// POST a JSON:API body
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.execute(Method::POST, self.url_for(path), Some(body))
            .await
    }

    /// PATCH a JSON:API body
    pub async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        self.execute(Method::PATCH, self.url_for(path), Some(body))
            .await
    }

    /// Send one request and classify the outcome
    async fn execute(&self, method: Method, url: String, body: Option<&Value>) -> Result<Value> {
        let mut request =
            ApiRequest::new(method.clone(), url.clone(), self.timeout, self.verify_tls)
                .with_header("Content-Type", api::CONTENT_TYPE);
        if let Some(agent) = &self.user_agent {
            request = request.with_header("User-Agent", agent.as_str());
        }
        if let Some(body) = body {
            let encoded = serde_json::to_vec(body).map_err(|e| {
                TfcError::InvalidParams(format!("Failed to encode request body: {}", e))
            })?;
            request.body = Some(encoded);
        }
        let request = self.auth.sign(request);

        debug!("{} {}", method, url);

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| TfcError::Transport {
                method: method.to_string(),
                url: url.clone(),
                message: e.to_string(),
            })?;

        debug!("{} {} returned status {}", method, url, response.status);

        if response.status >= 400 {
            return Err(TfcError::Status {
                method: method.to_string(),
                url,
                status: response.status,
                message: status_message(response.status, &response.body),
            });
        }

        decode_body(&response.body).map_err(|e| TfcError::Decode {
            method: method.to_string(),
            url,
            message: e.to_string(),
        })
    }
}

/// Append query parameters, encoding values
fn append_query(mut url: String, query: &[QueryParam]) -> String {
    if query.is_empty() {
        return url;
    }
    let encoded: Vec<String> = query
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();
    let separator = if url.contains('?') { '&' } else { '?' };
    url.push(separator);
    url.push_str(&encoded.join("&"));
    url
}

/// Decode a response body; an empty body decodes to `null`
fn decode_body(body: &str) -> std::result::Result<Value, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body)
}

/// Reason phrase plus whatever detail the API returned
fn status_message(status: u16, body: &str) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status");

    match api_error_detail(body) {
        Some(detail) => format!("{}: {}", reason, detail),
        None => reason.to_string(),
    }
}

/// Extract messages from a JSON:API `errors` array, or quote a short raw body
fn api_error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        let messages: Vec<String> = json
            .get("errors")
            .and_then(|e| e.as_array())
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| {
                        // errors can be objects ({title, detail}) or bare strings
                        e.get("detail")
                            .or_else(|| e.get("title"))
                            .and_then(|m| m.as_str())
                            .or_else(|| e.as_str())
                            .map(str::to_string)
                    })
                    .collect()
            })
            .unwrap_or_default();
        if !messages.is_empty() {
            return Some(messages.join("; "));
        }
    }

    Some(trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect())
}

#[cfg(test)]
impl<T: Transport> TfcClient<T> {
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
impl TfcClient {
    /// Create a test client pointed at a mock server
    pub fn test_client(base_url: &str) -> Self {
        Self::new(&ClientConfig::new("test-token").base_url(Some(base_url)))
            .expect("valid test client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfc::transport::StubTransport;

    fn stub_client(stub: StubTransport) -> TfcClient<StubTransport> {
        TfcClient::with_transport(&ClientConfig::new("test-token"), stub).unwrap()
    }

    #[test]
    fn test_default_api_url() {
        let client = TfcClient::new(&ClientConfig::new("token")).unwrap();
        assert_eq!(client.api_url(), "https://app.terraform.io/api/v2");
    }

    #[test]
    fn test_custom_base_url_and_version() {
        let config = ClientConfig::new("token")
            .base_url(Some("https://tfe.example.com/"))
            .api_version("v3");
        let client = TfcClient::new(&config).unwrap();
        assert_eq!(client.api_url(), "https://tfe.example.com/api/v3");
    }

    #[test]
    fn test_ftp_base_url_rejected() {
        let config = ClientConfig::new("token").base_url(Some("ftp://x"));
        match TfcClient::new(&config) {
            Err(TfcError::Config(msg)) => assert!(msg.contains("ftp://x")),
            Err(e) => panic!("Expected TfcError::Config, got {}", e),
            Ok(_) => panic!("Expected TfcError::Config"),
        }
    }

    #[test]
    fn test_https_base_url_accepted() {
        let config = ClientConfig::new("token").base_url(Some("https://x"));
        assert!(TfcClient::new(&config).is_ok());
    }

    #[test]
    fn test_base_url_scheme_case_insensitive() {
        assert!(validate_base_url("HTTPS://X").is_ok());
        assert!(validate_base_url("Http://x").is_ok());
        assert!(validate_base_url("app.terraform.io").is_err());
    }

    #[test]
    fn test_url_for_relative_path() {
        let client = stub_client(StubTransport::new());
        assert_eq!(
            client.url_for("/workspaces/ws-1"),
            "https://app.terraform.io/api/v2/workspaces/ws-1"
        );
    }

    #[test]
    fn test_url_for_absolute_override() {
        let client = stub_client(StubTransport::new());
        let link = "https://other.example.com/api/v2/organizations/o/workspaces?page%5Bnumber%5D=2";
        assert_eq!(client.url_for(link), link);
    }

    #[test]
    fn test_append_query_encodes_values() {
        let url = append_query(
            "https://x/api/v2/organizations/o/workspaces".to_string(),
            &[
                ("page[number]", "1".to_string()),
                ("search[name]", "my app&co".to_string()),
            ],
        );
        assert_eq!(
            url,
            "https://x/api/v2/organizations/o/workspaces?page[number]=1&search[name]=my%20app%26co"
        );
    }

    #[test]
    fn test_append_query_existing_query_string() {
        let url = append_query("https://x/y?a=1".to_string(), &[("b", "2".to_string())]);
        assert_eq!(url, "https://x/y?a=1&b=2");
    }

    #[test]
    fn test_decode_empty_body_is_null() {
        assert_eq!(decode_body("").unwrap(), Value::Null);
        assert_eq!(decode_body("  \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_status_message_with_jsonapi_errors() {
        let body = r#"{"errors":[{"status":"404","title":"not found"}]}"#;
        assert_eq!(status_message(404, body), "Not Found: not found");
    }

    #[test]
    fn test_status_message_prefers_detail() {
        let body = r#"{"errors":[{"title":"invalid","detail":"Name has already been taken"}]}"#;
        assert_eq!(
            status_message(422, body),
            "Unprocessable Entity: Name has already been taken"
        );
    }

    #[test]
    fn test_status_message_plain_body() {
        assert_eq!(status_message(500, "boom"), "Internal Server Error: boom");
        assert_eq!(status_message(401, ""), "Unauthorized");
    }

    #[tokio::test]
    async fn test_request_headers_and_signing() {
        let stub = StubTransport::new().reply(200, r#"{"data":{}}"#);
        let client = stub_client(stub);

        client.get("/workspaces/ws-1", &[]).await.unwrap();

        let requests = client.transport.requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.header("Content-Type"), Some("application/vnd.api+json"));
        assert_eq!(req.header("Authorization"), Some("Bearer test-token"));
        assert!(req.body.is_none());
        assert!(req.verify_tls);
        assert_eq!(req.timeout, Duration::from_secs(10));
    }

    struct TeamTokenHeader;

    impl Authenticator for TeamTokenHeader {
        fn sign(&self, request: ApiRequest) -> ApiRequest {
            request
                .with_header("Authorization", "Token team-abc")
                .with_header("X-Team", "platform")
        }
    }

    #[tokio::test]
    async fn test_custom_authenticator_replaces_bearer() {
        let stub = StubTransport::new().reply(200, "{}");
        let client = stub_client(stub).with_authenticator(TeamTokenHeader);

        client.get("/workspaces/ws-1", &[]).await.unwrap();

        let req = &client.transport.requests()[0];
        assert_eq!(req.header("Authorization"), Some("Token team-abc"));
        assert_eq!(req.header("X-Team"), Some("platform"));
        assert_eq!(req.header("Content-Type"), Some("application/vnd.api+json"));
        assert_eq!(
            req.headers
                .iter()
                .filter(|(n, _)| n.eq_ignore_ascii_case("Authorization"))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_empty_token_sends_no_authorization() {
        let stub = StubTransport::new().reply(200, "{}");
        let client = TfcClient::with_transport(&ClientConfig::new(""), stub).unwrap();

        client.get("/workspaces/ws-1", &[]).await.unwrap();

        assert!(client.transport.requests()[0]
            .header("Authorization")
            .is_none());
    }

    #[tokio::test]
    async fn test_timeout_and_tls_flag_forwarded() {
        let stub = StubTransport::new().reply(200, "{}");
        let config = ClientConfig::new("t")
            .timeout(Duration::from_secs(3))
            .verify_tls(false)
            .user_agent(Some("Ansible"));
        let client = TfcClient::with_transport(&config, stub).unwrap();

        client.patch("/vars/var-1", &serde_json::json!({})).await.unwrap();

        let req = &client.transport.requests()[0];
        assert_eq!(req.timeout, Duration::from_secs(3));
        assert!(!req.verify_tls);
        assert_eq!(req.header("User-Agent"), Some("Ansible"));
    }

    #[tokio::test]
    async fn test_transport_failure_mapped() {
        let stub = StubTransport::new().fail("connection refused");
        let client = stub_client(stub);

        let err = client.get("/workspaces/ws-1", &[]).await.unwrap_err();
        match err {
            TfcError::Transport {
                method,
                url,
                message,
            } => {
                assert_eq!(method, "GET");
                assert!(url.ends_with("/workspaces/ws-1"));
                assert_eq!(message, "connection refused");
            }
            e => panic!("Expected TfcError::Transport, got {}", e),
        }
    }

    #[tokio::test]
    async fn test_patch_sends_encoded_body() {
        let stub = StubTransport::new().reply(200, r#"{"data":{"id":"var-1"}}"#);
        let client = stub_client(stub);
        let body = serde_json::json!({"data": {"attributes": {"value": "v"}}});

        let result = client.patch("/vars/var-1", &body).await.unwrap();
        assert_eq!(result["data"]["id"], "var-1");

        let req = &client.transport.requests()[0];
        assert_eq!(req.method, Method::PATCH);
        let sent: Value = serde_json::from_slice(req.body.as_ref().unwrap()).unwrap();
        assert_eq!(sent, body);
    }

    #[tokio::test]
    async fn test_single_attempt_on_failure() {
        let stub = StubTransport::new().reply(503, "").reply(200, "{}");
        let client = stub_client(stub);

        let err = client.get("/workspaces/ws-1", &[]).await.unwrap_err();
        assert!(matches!(err, TfcError::Status { status: 503, .. }));
        assert_eq!(client.transport.requests().len(), 1);
    }
}
