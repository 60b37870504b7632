//! Sentinel Hub OAuth2 token endpoint client

pub mod auth;
pub mod constants;
pub mod models;

pub use auth::{FetchError, TokenFetcher};
pub use models::TokenResponse;
