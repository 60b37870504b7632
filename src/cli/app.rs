use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

use crate::api::TokenFetcher;
use crate::api::constants::{TOKEN_URL, env};
use crate::auth::credentials::Credentials;

#[derive(Parser, Debug)]
#[command(name = "sentinel-token")]
#[command(about = "Request a Sentinel Hub OAuth2 token and inspect its claims")]
pub struct Cli {
    /// OAuth2 client ID
    #[arg(long, env = env::CLIENT_ID, hide_env_values = true)]
    pub client_id: Option<String>,
    /// OAuth2 client secret
    #[arg(long, env = env::CLIENT_SECRET, hide_env_values = true)]
    pub client_secret: Option<String>,
    /// Load credentials from a specific .env file
    #[arg(long)]
    pub env_file: Option<String>,
    /// Token endpoint URL
    #[arg(long, env = env::TOKEN_URL, default_value = TOKEN_URL)]
    pub token_url: String,
    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Resolves each credential: flag or environment first, then `--env-file`.
    pub fn credentials(&self) -> Result<Credentials> {
        Credentials::resolve(
            self.client_id.clone(),
            self.client_secret.clone(),
            self.env_file.as_deref(),
        )
    }

    pub fn fetcher(&self) -> Result<TokenFetcher> {
        let fetcher = TokenFetcher::new().with_token_url(self.token_url.clone());
        match self.timeout_secs {
            Some(secs) => fetcher
                .with_timeout(Duration::from_secs(secs))
                .context("Failed to build HTTP client"),
            None => Ok(fetcher),
        }
    }
}
