// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `AUTH_AUDIENCE` | Expected token audience claim | Required |
//! | `AUTH_DOMAIN` | Identity provider domain; issuer is `https://{domain}/` | Required |
//! | `RECORD_STORE_URL` | Hosted record store base URL | In-memory profiles |
//! | `RECORD_STORE_API_KEY` | Record store API key | None |
//! | `PROFILES_TABLE` | Table holding local profiles | `profiles` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;

use url::Url;

use crate::auth::claims::expected_issuer;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const AUTH_AUDIENCE_ENV: &str = "AUTH_AUDIENCE";
pub const AUTH_DOMAIN_ENV: &str = "AUTH_DOMAIN";
pub const RECORD_STORE_URL_ENV: &str = "RECORD_STORE_URL";
pub const RECORD_STORE_API_KEY_ENV: &str = "RECORD_STORE_API_KEY";
pub const PROFILES_TABLE_ENV: &str = "PROFILES_TABLE";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PROFILES_TABLE: &str = "profiles";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Expected token scope. Both values are trusted operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub audience: String,
    /// Bare domain, e.g. `tenant.example`
    pub domain: String,
}

impl AuthConfig {
    pub fn new(audience: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            audience: audience.into(),
            domain: domain.into(),
        }
    }

    pub fn issuer(&self) -> String {
        expected_issuer(&self.domain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStoreConfig {
    pub url: Url,
    pub api_key: Option<String>,
    pub table: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
    /// `None` keeps profiles in memory.
    pub record_store: Option<RecordStoreConfig>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let require = |var: &'static str| get(var).ok_or(ConfigError::Missing(var));

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(port) => port.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: HOST_ENV,
                reason: e.to_string(),
            })?;

        let auth = AuthConfig::new(require(AUTH_AUDIENCE_ENV)?, require(AUTH_DOMAIN_ENV)?);

        let record_store = match get(RECORD_STORE_URL_ENV) {
            Some(raw) => Some(RecordStoreConfig {
                url: Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                    var: RECORD_STORE_URL_ENV,
                    reason: e.to_string(),
                })?,
                api_key: get(RECORD_STORE_API_KEY_ENV),
                table: get(PROFILES_TABLE_ENV).unwrap_or_else(|| DEFAULT_PROFILES_TABLE.to_string()),
            }),
            None => None,
        };

        let log_format = match get(LOG_FORMAT_ENV).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: LOG_FORMAT_ENV,
                    reason: format!("expected `json` or `pretty`, got `{other}`"),
                })
            }
        };

        Ok(Self {
            bind_addr,
            auth,
            record_store,
            log_format,
        })
    }
}
