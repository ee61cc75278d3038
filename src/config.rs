/// Configuration constants for the HCP Terraform API
pub mod api {
    /// Default API host URL (HCP Terraform)
    pub const DEFAULT_URL: &str = "https://app.terraform.io";

    /// API version segment appended after `/api/`
    pub const VERSION: &str = "v2";

    /// Content type sent with every request (JSON:API)
    pub const CONTENT_TYPE: &str = "application/vnd.api+json";

    /// Organizations endpoint
    pub const ORGANIZATIONS: &str = "organizations";

    /// Workspaces endpoint
    pub const WORKSPACES: &str = "workspaces";

    /// Variables endpoint (workspace-scoped and global)
    pub const VARS: &str = "vars";
}

/// Default values for module parameters
pub mod defaults {
    /// Connection timeout in seconds
    pub const CONNECTION_TIMEOUT_SECS: u64 = 10;

    /// First page of a list endpoint
    pub const PAGE_NUMBER: u32 = 1;

    /// Default page size for list endpoints
    pub const PAGE_SIZE: u32 = 20;

    /// User-Agent sent by Ansible modules when `http_agent` is not set
    pub const MODULE_HTTP_AGENT: &str = "Ansible";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}

/// Configuration constants for credentials
pub mod credentials {
    /// Credentials file name
    pub const FILE_NAME: &str = "terraform.d/credentials.tfrc.json";

    /// Path to Terraform credentials file on Unix (relative to HOME)
    pub const FILE_PATH_UNIX: &str = ".terraform.d/credentials.tfrc.json";

    /// Environment variable names for token (checked in order)
    pub const TOKEN_ENV_VARS: &[&str] = &["HCP_TOKEN", "TFC_TOKEN", "TFE_TOKEN"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url_has_scheme() {
        assert!(api::DEFAULT_URL.starts_with("https://"));
        assert!(!api::DEFAULT_URL.ends_with('/'));
    }

    #[test]
    fn test_credentials_env_vars() {
        assert_eq!(
            credentials::TOKEN_ENV_VARS,
            &["HCP_TOKEN", "TFC_TOKEN", "TFE_TOKEN"]
        );
    }

    #[test]
    fn test_page_defaults_are_positive() {
        assert!(defaults::PAGE_NUMBER >= 1);
        assert!(defaults::PAGE_SIZE >= 1);
    }
}
