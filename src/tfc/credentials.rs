//! API token resolution from multiple sources

use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{api, credentials};
use crate::error::{Result, TfcError};

/// Credentials file structure
#[derive(Deserialize, Debug)]
struct TerraformCredentials {
    credentials: HashMap<String, TerraformCredential>,
}

/// Single credential entry
#[derive(Deserialize, Debug)]
struct TerraformCredential {
    token: String,
}

/// Extract the host from an API base URL
///
/// `https://tfe.example.com:8443/` becomes `tfe.example.com:8443`.
pub fn host_from_url(url: &str) -> String {
    let without_scheme = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}

/// Token resolution with fallback logic
pub struct TokenResolver {
    host: String,
    credentials_path: Option<PathBuf>,
}

impl TokenResolver {
    /// Create a resolver for the host of the given API base URL
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            host: host_from_url(base_url.unwrap_or(api::DEFAULT_URL)),
            credentials_path: Self::get_credentials_path(),
        }
    }

    /// Read credentials from a specific file instead of the Terraform default
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Resolve token from multiple sources with fallback:
    /// 1. Explicit parameter or CLI argument
    /// 2. Environment variables (HCP_TOKEN, TFC_TOKEN, TFE_TOKEN - in order)
    /// 3. Credentials file (~/.terraform.d/credentials.tfrc.json)
    pub fn resolve(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(token) = explicit {
            debug!("Using token from parameters");
            return Ok(token.to_string());
        }

        for env_var in credentials::TOKEN_ENV_VARS {
            if let Ok(token) = std::env::var(env_var) {
                if !token.is_empty() {
                    debug!("Using token from {} environment variable", env_var);
                    return Ok(token);
                }
            }
        }

        debug!(
            "No token found in environment variables {:?}, trying credentials file",
            credentials::TOKEN_ENV_VARS
        );
        self.read_from_credentials_file()
    }

    /// Read token from Terraform credentials file
    fn read_from_credentials_file(&self) -> Result<String> {
        let credentials_path = self
            .credentials_path
            .as_deref()
            .ok_or_else(|| TfcError::TokenNotFound(self.token_not_found_message(None)))?;

        debug!(
            "Looking for credentials file at: {}",
            credentials_path.display()
        );

        let content = match fs::read_to_string(credentials_path) {
            Ok(content) => content,
            Err(_) => {
                return Err(TfcError::TokenNotFound(
                    self.token_not_found_message(Some(credentials_path)),
                ));
            }
        };

        let creds: TerraformCredentials = serde_json::from_str(&content).map_err(|e| {
            TfcError::Credentials(format!(
                "Could not parse credentials file {}: {}",
                credentials_path.display(),
                e
            ))
        })?;

        creds
            .credentials
            .get(&self.host)
            .map(|cred| {
                debug!(
                    "Using token from credentials file {} for host: {}",
                    credentials_path.display(),
                    self.host
                );
                cred.token.clone()
            })
            .ok_or_else(|| {
                TfcError::TokenNotFound(self.token_not_found_message(Some(credentials_path)))
            })
    }

    fn token_not_found_message(&self, credentials_path: Option<&Path>) -> String {
        let env_vars = credentials::TOKEN_ENV_VARS.join(", ");
        let creds_info = credentials_path
            .map(|p| format!(" or in credentials file {}", p.display()))
            .unwrap_or_default();

        format!(
            "No API token found for host '{}'. Provide one with the api_token parameter, \
             the --token flag, one of the environment variables [{}], \
             or run 'terraform login {}'. Checked: env vars{}",
            self.host, env_vars, self.host, creds_info
        )
    }

    /// Get the path to Terraform credentials file (platform-specific)
    /// - Windows: %APPDATA%\terraform.d\credentials.tfrc.json
    /// - Linux/macOS: ~/.terraform.d/credentials.tfrc.json
    fn get_credentials_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            dirs::config_dir().map(|p| p.join(credentials::FILE_NAME))
        }

        #[cfg(not(windows))]
        {
            dirs::home_dir().map(|p| p.join(credentials::FILE_PATH_UNIX))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn credentials_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_explicit_token_takes_precedence() {
        let resolver = TokenResolver::new(None);
        assert_eq!(resolver.resolve(Some("param-token")).unwrap(), "param-token");
    }

    #[test]
    fn test_host_from_url() {
        assert_eq!(host_from_url("https://app.terraform.io"), "app.terraform.io");
        assert_eq!(
            host_from_url("https://tfe.example.com:8443/"),
            "tfe.example.com:8443"
        );
        assert_eq!(host_from_url("tfe.local/x"), "tfe.local");
    }

    #[test]
    fn test_resolver_default_host() {
        let resolver = TokenResolver::new(None);
        assert_eq!(resolver.host, "app.terraform.io");
    }

    #[test]
    fn test_read_from_credentials_file_by_host() {
        let file = credentials_file(
            r#"{
                "credentials": {
                    "app.terraform.io": {"token": "saas-token"},
                    "tfe.example.com": {"token": "tfe-token"}
                }
            }"#,
        );
        let resolver =
            TokenResolver::new(Some("https://tfe.example.com")).with_credentials_path(file.path());
        assert_eq!(resolver.read_from_credentials_file().unwrap(), "tfe-token");
    }

    #[test]
    fn test_credentials_file_missing_host() {
        let file = credentials_file(r#"{"credentials": {}}"#);
        let resolver = TokenResolver::new(None).with_credentials_path(file.path());
        let err = resolver.read_from_credentials_file().unwrap_err();
        assert!(matches!(err, TfcError::TokenNotFound(_)));
        assert!(err.to_string().contains("app.terraform.io"));
    }

    #[test]
    fn test_credentials_file_invalid_json() {
        let file = credentials_file("not json");
        let resolver = TokenResolver::new(None).with_credentials_path(file.path());
        let err = resolver.read_from_credentials_file().unwrap_err();
        assert!(matches!(err, TfcError::Credentials(_)));
    }

    #[test]
    fn test_credentials_file_absent() {
        let resolver =
            TokenResolver::new(None).with_credentials_path("/nonexistent/credentials.tfrc.json");
        let err = resolver.read_from_credentials_file().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/credentials.tfrc.json"));
    }

    #[test]
    fn test_token_not_found_message_format() {
        let resolver = TokenResolver::new(None);
        let msg = resolver.token_not_found_message(None);
        assert!(msg.contains("app.terraform.io"));
        assert!(msg.contains("HCP_TOKEN"));
        assert!(msg.contains("terraform login"));
    }

    #[test]
    fn test_get_credentials_path() {
        let path = TokenResolver::get_credentials_path();
        assert!(path.is_some());
        assert!(path
            .unwrap()
            .to_string_lossy()
            .contains("credentials.tfrc.json"));
    }
}
