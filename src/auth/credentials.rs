use anyhow::Result;
use log::info;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::api::constants::{env, CLIENT_ID_PREFIX_LEN};

/// OAuth2 client credentials for the token endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn from_env_file(path: &str) -> Result<Credentials> {
        info!("Importing from .env file: {}", path);

        let vars = read_env_file(path)?;
        let client_id = vars
            .get(env::CLIENT_ID)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("{} not found in .env file: {}", env::CLIENT_ID, path))?;
        let client_secret = vars.get(env::CLIENT_SECRET).cloned().ok_or_else(|| {
            anyhow::anyhow!("{} not found in .env file: {}", env::CLIENT_SECRET, path)
        })?;

        Ok(Credentials {
            client_id,
            client_secret,
        })
    }

    /// Resolves each field on its own: explicit value, then environment, then `env_file`.
    ///
    /// The file is only read when a field is still missing.
    pub fn resolve(
        client_id: Option<String>,
        client_secret: Option<String>,
        env_file: Option<&str>,
    ) -> Result<Credentials> {
        let from_process = |value: Option<String>, name: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .or_else(|| read_var(name).ok())
        };
        let mut client_id = from_process(client_id, env::CLIENT_ID);
        let mut client_secret = from_process(client_secret, env::CLIENT_SECRET);

        if let Some(path) = env_file.filter(|_| client_id.is_none() || client_secret.is_none()) {
            info!("Filling missing credentials from .env file: {}", path);
            let mut vars = read_env_file(path)?;
            client_id = client_id.or_else(|| vars.remove(env::CLIENT_ID));
            client_secret = client_secret.or_else(|| vars.remove(env::CLIENT_SECRET));
        }

        let missing = |name: &str| match env_file {
            Some(path) => anyhow::anyhow!("{} not set and not found in .env file: {}", name, path),
            None => anyhow::anyhow!("{} environment variable not set", name),
        };

        Ok(Credentials {
            client_id: client_id.ok_or_else(|| missing(env::CLIENT_ID))?,
            client_secret: client_secret.ok_or_else(|| missing(env::CLIENT_SECRET))?,
        })
    }

    pub fn from_command_line(client_id: String, client_secret: String) -> Result<Credentials> {
        info!("Using command line parameters");

        if client_id.trim().is_empty() {
            anyhow::bail!("Client ID must not be empty");
        }
        if client_secret.trim().is_empty() {
            anyhow::bail!("Client secret must not be empty");
        }

        Ok(Credentials {
            client_id,
            client_secret,
        })
    }

    /// First few characters of the client id, safe to print.
    pub fn masked_client_id(&self) -> String {
        self.client_id.chars().take(CLIENT_ID_PREFIX_LEN).collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &format!("{}...", self.masked_client_id()))
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Parses a .env file without touching the process environment; empty values are skipped
fn read_env_file(path: &str) -> Result<HashMap<String, String>> {
    if !Path::new(path).exists() {
        anyhow::bail!("Environment file not found: {}", path);
    }

    let iter = dotenvy::from_path_iter(path)
        .map_err(|e| anyhow::anyhow!("Failed to load .env file '{}': {}", path, e))?;

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) =
            item.map_err(|e| anyhow::anyhow!("Failed to parse .env file '{}': {}", path, e))?;
        if !value.trim().is_empty() {
            vars.insert(key, value);
        }
    }
    Ok(vars)
}

/// Reads a variable, treating an empty value as unset
fn read_var(name: &str) -> std::result::Result<String, std::env::VarError> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(std::env::VarError::NotPresent),
        other => other,
    }
}
