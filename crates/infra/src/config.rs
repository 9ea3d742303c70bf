//! Configuration loading and representation.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DATA_DIR_VAR: &str = "STOCKROOM_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "STOCKROOM_BIND_ADDR";

const DEFAULT_DATA_DIR: &str = "./stockroom-data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var} '{value}': {message}")]
    Invalid {
        var: &'static str,
        value: String,
        message: String,
    },
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the persisted tables.
    pub data_dir: PathBuf,
    /// Listen address of the HTTP adapter.
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`; missing values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = setting(&lookup, DATA_DIR_VAR, DEFAULT_DATA_DIR);
        let bind_addr = setting(&lookup, BIND_ADDR_VAR, DEFAULT_BIND_ADDR);

        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: BIND_ADDR_VAR,
                value: bind_addr.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            bind_addr,
        })
    }
}

fn setting(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: &str) -> String {
    match lookup(var).filter(|v| !v.trim().is_empty()) {
        Some(value) => value,
        None => {
            tracing::warn!(var, default, "configuration variable not set, using default");
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn missing_values_use_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./stockroom-data"));
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn explicit_values_win() {
        let config = AppConfig::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/var/lib/stockroom"),
            (BIND_ADDR_VAR, "127.0.0.1:9000"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/stockroom"));
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn unparsable_bind_address_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: BIND_ADDR_VAR, .. }));
    }
}
