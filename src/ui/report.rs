//! Plain-text progress report written to standard output

use chrono::{Local, TimeZone};
use log::warn;
use std::fmt;
use std::io::{self, Write};

use crate::api::auth::FetchError;
use crate::auth::credentials::Credentials;
use crate::auth::jwt::{DecodeError, TokenPayload};

pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn requesting(&mut self, credentials: &Credentials) {
        self.line(format_args!(
            "[-] Requesting token for Client ID: {}...",
            credentials.masked_client_id()
        ));
    }

    pub fn decode_failed(&mut self, err: &DecodeError) {
        self.line(format_args!("Could not decode token: {}", err));
    }

    pub fn received(&mut self, payload: &TokenPayload) {
        let jti = payload.jti().unwrap_or("None");
        let expires = payload
            .exp()
            .and_then(format_expiry)
            .unwrap_or_else(|| "unknown".to_string());

        self.line(format_args!("[-] Token Received!"));
        self.line(format_args!("[-] Token Unique ID (jti): {}", jti));
        self.line(format_args!("[-] Token Expires at:      {} (Local Time)", expires));
    }

    pub fn missing_access_token(&mut self) {
        self.line(format_args!("[!] Response contained no access_token"));
    }

    pub fn fetch_failed(&mut self, err: &FetchError) {
        self.line(format_args!("[!] Error: {}", err));
        if let Some(body) = err.response_body() {
            self.line(format_args!("[!] Response: {}", body));
        }
    }

    pub fn access_token(&mut self, token: Option<&str>) {
        self.line(format_args!(""));
        self.line(format_args!("ACCESS TOKEN:"));
        self.line(format_args!("{}", token.unwrap_or("None")));
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            warn!("Failed to write report line: {}", e);
        }
    }
}

/// Formats epoch seconds as local wall-clock `HH:MM:SS`.
pub fn format_expiry(exp: i64) -> Option<String> {
    Local
        .timestamp_opt(exp, 0)
        .single()
        .map(|t| t.format("%H:%M:%S").to_string())
}
