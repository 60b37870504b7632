use serde::Deserialize;

/// Body returned by the token endpoint on success.
///
/// Only `access_token` is used; the remaining fields are kept for logging.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}
