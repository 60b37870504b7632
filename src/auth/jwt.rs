//! JWT payload inspection
//!
//! Only the middle (claims) segment is decoded. Signatures are never checked;
//! the claims are shown for information only.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use log::debug;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token has no payload segment")]
    MissingPayloadSegment,
    #[error("invalid base64 in payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// Decoded claims of a token
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenPayload {
    claims: Map<String, Value>,
}

impl TokenPayload {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self { claims }
    }

    /// Expiry as Unix epoch seconds
    pub fn exp(&self) -> Option<i64> {
        self.claims.get("exp").and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
        })
    }

    /// JWT ID
    pub fn jti(&self) -> Option<&str> {
        self.claims.get("jti").and_then(Value::as_str)
    }

    pub fn get(&self, claim: &str) -> Option<&Value> {
        self.claims.get(claim)
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// Pads a base64url segment with `=` up to a multiple of 4 characters.
pub fn pad_segment(segment: &str) -> String {
    let padding = (4 - segment.len() % 4) % 4;
    let mut padded = String::with_capacity(segment.len() + padding);
    padded.push_str(segment);
    padded.extend(std::iter::repeat_n('=', padding));
    padded
}

pub fn try_decode_payload(token: &str) -> Result<TokenPayload, DecodeError> {
    let segment = token
        .split('.')
        .nth(1)
        .ok_or(DecodeError::MissingPayloadSegment)?;

    let bytes = URL_SAFE.decode(pad_segment(segment))?;
    match serde_json::from_slice::<Value>(&bytes)? {
        Value::Object(claims) => {
            debug!("Decoded {} token claims", claims.len());
            Ok(TokenPayload::new(claims))
        }
        _ => Err(DecodeError::NotAnObject),
    }
}

/// Standalone swallow-and-continue decode for callers without a `Reporter`.
///
/// Prints the failure to stdout and returns empty claims. `TokenFetcher::fetch`
/// uses `try_decode_payload` instead and routes failures through its reporter.
pub fn decode_payload(token: &str) -> TokenPayload {
    match try_decode_payload(token) {
        Ok(payload) => payload,
        Err(e) => {
            println!("Could not decode token: {}", e);
            TokenPayload::default()
        }
    }
}
