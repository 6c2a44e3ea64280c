//! Connection records and the sources that resolve them.
//!
//! The orchestration layer stores host/login/password triples under a
//! connection id. A [`ConnectionSource`] hands back the raw record;
//! [`ConnectionConfig::credentials`] is the only way to turn it into a
//! usable triple, and it fails before any network I/O when a field is
//! absent.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Raw connection record as stored by the orchestration layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
}

/// A validated host/login/password triple.
#[derive(Clone)]
pub struct Credentials {
    pub host: String,
    pub login: String,
    pub password: String,
}

impl ConnectionConfig {
    pub fn new(
        host: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: Some(host.into()),
            login: Some(login.into()),
            password: Some(password.into()),
        }
    }

    /// Validate field presence in order: host, login, password. The first
    /// missing or empty field fails with `{field} not provided`.
    pub fn credentials(&self) -> Result<Credentials, Error> {
        Ok(Credentials {
            host: required(self.host.as_deref(), "host")?,
            login: required(self.login.as_deref(), "login")?,
            password: required(self.password.as_deref(), "password")?,
        })
    }
}

fn required(value: Option<&str>, field: &str) -> Result<String, Error> {
    match value {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(Error::missing(field)),
    }
}

/// Capability to look up the raw connection record for a connection id.
#[async_trait]
pub trait ConnectionSource: Send + Sync {
    async fn resolve(&self, conn_id: &str) -> Result<ConnectionConfig, Error>;
}

/// Resolve `conn_id` through `source` and validate the triple.
pub async fn resolve_credentials(
    source: &dyn ConnectionSource,
    conn_id: &str,
) -> Result<Credentials, Error> {
    let config = source.resolve(conn_id).await?;
    config.credentials()
}

/// In-process connection store, id -> record.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    connections: HashMap<String, ConnectionConfig>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_connection(mut self, conn_id: impl Into<String>, config: ConnectionConfig) -> Self {
        self.insert(conn_id, config);
        self
    }

    pub fn insert(&mut self, conn_id: impl Into<String>, config: ConnectionConfig) {
        self.connections.insert(conn_id.into(), config);
    }
}

#[async_trait]
impl ConnectionSource for MemorySource {
    async fn resolve(&self, conn_id: &str) -> Result<ConnectionConfig, Error> {
        self.connections
            .get(conn_id)
            .cloned()
            .ok_or_else(|| Error::configuration(format!("connection not defined: {conn_id}")))
    }
}

/// Reads `<CONN_ID>_HOST`, `<CONN_ID>_LOGIN` and `<CONN_ID>_PASSWORD` from
/// the process environment, with the connection id uppercased and
/// non-alphanumeric characters mapped to `_`. Absent variables surface as
/// absent fields, so validation reports them field by field.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl EnvSource {
    fn var(conn_id: &str, suffix: &str) -> Option<String> {
        let prefix: String = conn_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        std::env::var(format!("{prefix}_{suffix}"))
            .ok()
            .filter(|value| !value.is_empty())
    }
}

#[async_trait]
impl ConnectionSource for EnvSource {
    async fn resolve(&self, conn_id: &str) -> Result<ConnectionConfig, Error> {
        Ok(ConnectionConfig {
            host: Self::var(conn_id, "HOST"),
            login: Self::var(conn_id, "LOGIN"),
            password: Self::var(conn_id, "PASSWORD"),
        })
    }
}

// Credentials carries a secret; keep it out of debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}
