use std::io::Write;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::StatusCode;
use thiserror::Error;

use super::constants::{GRANT_TYPE_CLIENT_CREDENTIALS, TOKEN_URL};
use super::models::TokenResponse;
use crate::auth::credentials::Credentials;
use crate::auth::jwt::{self, TokenPayload};
use crate::ui::report::Reporter;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("{status} for url: {url}")]
    Status {
        status: StatusCode,
        url: String,
        body: String,
    },
    #[error("token response is not valid JSON: {source}")]
    InvalidResponse {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl FetchError {
    /// Raw response body, when the endpoint returned a non-empty one
    pub fn response_body(&self) -> Option<&str> {
        match self {
            FetchError::Status { body, .. } | FetchError::InvalidResponse { body, .. } => {
                Some(body.as_str()).filter(|b| !b.is_empty())
            }
            FetchError::Network(_) => None,
        }
    }
}

/// Requests client-credentials tokens from a single token endpoint
pub struct TokenFetcher {
    client: reqwest::Client,
    token_url: String,
}

impl TokenFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            token_url: TOKEN_URL.to_string(),
        }
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, FetchError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// POSTs the client-credentials form and parses the token response.
    pub async fn request_token(&self, credentials: &Credentials) -> Result<TokenResponse, FetchError> {
        info!(
            "Requesting token from {} for client {}...",
            self.token_url,
            credentials.masked_client_id()
        );

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!("Token request status: {}", status);

        if !status.is_success() {
            let url = response.url().to_string();
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Failed to read error response body: {}", e);
                    String::new()
                }
            };
            return Err(FetchError::Status { status, url, body });
        }

        let body = response.text().await?;
        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|source| FetchError::InvalidResponse { source, body })?;

        debug!(
            "Token response: type={:?}, expires_in={:?}",
            token_response.token_type, token_response.expires_in
        );
        Ok(token_response)
    }

    /// Fetches a token and reports progress, returning `None` on any failure.
    pub async fn fetch<W: Write>(
        &self,
        credentials: &Credentials,
        reporter: &mut Reporter<W>,
    ) -> Option<String> {
        reporter.requesting(credentials);

        match self.request_token(credentials).await {
            Ok(TokenResponse {
                access_token: Some(token),
                ..
            }) => {
                let payload = jwt::try_decode_payload(&token).unwrap_or_else(|e| {
                    warn!("Could not decode token payload: {}", e);
                    reporter.decode_failed(&e);
                    TokenPayload::default()
                });
                reporter.received(&payload);
                info!("Token received");
                Some(token)
            }
            Ok(_) => {
                warn!("Token response did not include an access_token");
                reporter.missing_access_token();
                None
            }
            Err(e) => {
                warn!("Token request failed: {}", e);
                reporter.fetch_failed(&e);
                None
            }
        }
    }
}

impl Default for TokenFetcher {
    fn default() -> Self {
        Self::new()
    }
}
