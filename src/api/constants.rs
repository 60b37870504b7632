//! Token endpoint constants for Sentinel Hub

/// OAuth2 token endpoint for Sentinel Hub services
pub const TOKEN_URL: &str = "https://services.sentinel-hub.com/oauth/token";

/// Grant type sent in the token request body
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

/// Environment variable names read for configuration
pub mod env {
    pub const CLIENT_ID: &str = "SENTINEL_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "SENTINEL_CLIENT_SECRET";
    pub const TOKEN_URL: &str = "SENTINEL_TOKEN_URL";
}

/// Number of client id characters shown in output
pub const CLIENT_ID_PREFIX_LEN: usize = 5;
