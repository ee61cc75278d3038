use std::fmt;

/// Error type for every failure surfaced by the modules
#[derive(Debug)]
pub enum TfcError {
    /// Client configuration is unusable (bad base URL, HTTP client build failure)
    Config(String),
    /// Request never produced an HTTP response (connection, TLS, timeout)
    Transport {
        method: String,
        url: String,
        message: String,
    },
    /// API answered with a 4xx/5xx status
    Status {
        method: String,
        url: String,
        status: u16,
        message: String,
    },
    /// Response body is not valid JSON
    Decode {
        method: String,
        url: String,
        message: String,
    },
    /// A resource could not be resolved from the identifying inputs
    Resolution(String),
    /// Parameters violate the module contract
    InvalidParams(String),
    /// Token not found in any source
    TokenNotFound(String),
    /// Failed to read or parse a credentials or arguments file
    Credentials(String),
}

impl fmt::Display for TfcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TfcError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TfcError::Transport {
                method,
                url,
                message,
            } => write!(f, "Error trying request {} {}: {}", method, url, message),
            TfcError::Status {
                method,
                url,
                status,
                message,
            } => write!(
                f,
                "Status code error from request {} {}: {} {}",
                method, url, status, message
            ),
            TfcError::Decode {
                method,
                url,
                message,
            } => write!(
                f,
                "API returned invalid JSON when trying to {} {}: {}",
                method, url, message
            ),
            TfcError::Resolution(msg) => write!(f, "{}", msg),
            TfcError::InvalidParams(msg) => write!(f, "Invalid parameters: {}", msg),
            TfcError::TokenNotFound(msg) => write!(f, "{}", msg),
            TfcError::Credentials(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TfcError {}

impl From<serde_json::Error> for TfcError {
    fn from(err: serde_json::Error) -> Self {
        TfcError::InvalidParams(err.to_string())
    }
}

impl From<std::io::Error> for TfcError {
    fn from(err: std::io::Error) -> Self {
        TfcError::Credentials(err.to_string())
    }
}

/// Result type alias for module operations
pub type Result<T> = std::result::Result<T, TfcError>;
