// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! The gateway reads a YAML file whose path comes from the `--config` flag
//! or, failing that, the `CONFIG_PATH` environment variable. Any problem with
//! the file is fatal: `main` exits before binding the listener.
//!
//! ## File Format
//!
//! ```yaml
//! jwt_secret: "change-me"        # required
//! listen_addr: "0.0.0.0:8082"
//! auth_service:
//!   address: "http://app:44044"
//!   app_id: 1
//!   timeout_secs: 15
//!   connect_timeout_secs: 5
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `CONFIG_PATH` | Config file path (overridden by `--config`) | none, required |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::rpc::client::SsoClientConfig;

/// Environment variable consulted when `--config` is not given.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8082";
const DEFAULT_AUTH_SERVICE_ADDR: &str = "http://app:44044";
const DEFAULT_APP_ID: i32 = 1;
const DEFAULT_CALL_TIMEOUT_SECS: u64 = 15;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "auth-gateway", version, about = "REST gateway for the SSO service")]
pub struct Args {
    /// Path to the YAML config file
    #[arg(long = "config", env = "CONFIG_PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config path is empty (pass --config or set CONFIG_PATH)")]
    EmptyPath,
    #[error("config file does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("jwt_secret is required")]
    MissingSecret,
    #[error("invalid listen_addr {0:?}")]
    InvalidListenAddr(String),
    #[error("auth_service.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// On-disk shape; validated into [`Config`].
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    jwt_secret: Option<String>,
    #[serde(default = "default_listen_addr")]
    listen_addr: String,
    #[serde(default)]
    auth_service: AuthServiceConfig,
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

/// Connection and call settings for the remote SSO service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthServiceConfig {
    pub address: String,
    pub app_id: i32,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_AUTH_SERVICE_ADDR.to_string(),
            app_id: DEFAULT_APP_ID,
            timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl AuthServiceConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn client_config(&self) -> SsoClientConfig {
        SsoClientConfig {
            address: self.address.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

/// Validated gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub listen_addr: SocketAddr,
    pub auth_service: AuthServiceConfig,
}

impl Config {
    /// Load from the path given on the command line or in the environment.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        match args.config.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => Self::load_from_path(path),
            _ => Err(ConfigError::EmptyPath),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(contents)?;

        let jwt_secret = raw
            .jwt_secret
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let listen_addr = raw
            .listen_addr
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(raw.listen_addr.clone()))?;

        if raw.auth_service.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("timeout_secs"));
        }
        if raw.auth_service.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("connect_timeout_secs"));
        }

        Ok(Self {
            jwt_secret,
            listen_addr,
            auth_service: raw.auth_service,
        })
    }
}
