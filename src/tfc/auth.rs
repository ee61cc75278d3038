//! Request authentication

use std::fmt;

use super::transport::ApiRequest;

/// Signs an outgoing request
pub trait Authenticator: Send + Sync {
    fn sign(&self, request: ApiRequest) -> ApiRequest;
}

/// Bearer token authentication (`Authorization: Bearer <token>`)
///
/// An empty token leaves the request untouched.
#[derive(Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Authenticator for BearerToken {
    fn sign(&self, request: ApiRequest) -> ApiRequest {
        if self.token.is_empty() {
            return request;
        }
        request.with_header("Authorization", format!("Bearer {}", self.token))
    }
}
