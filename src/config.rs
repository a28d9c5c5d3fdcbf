//! Relay configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::RelayError;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Capacity of each connection's outbound queue.
    pub connection_buffer: usize,

    /// Timeout applied to REST requests.
    pub request_timeout: Duration,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            connection_buffer: DEFAULT_CONNECTION_BUFFER,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_format: LogFormat::Text,
        }
    }
}

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CONNECTION_BUFFER: usize = 256;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file,
    /// then reads:
    ///
    /// | Variable               | Default        |
    /// |------------------------|----------------|
    /// | `LISTEN_ADDR`          | `0.0.0.0:$PORT` |
    /// | `PORT`                 | `8080`         |
    /// | `CONNECTION_BUFFER`    | `256`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`           |
    /// | `LOG_FORMAT`           | `text`         |
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Config`] if `LISTEN_ADDR` is set but cannot be
    /// parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Config`] on an unparsable `LISTEN_ADDR`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(raw) => raw
                .parse()
                .map_err(|e| RelayError::Config(format!("invalid LISTEN_ADDR {raw:?}: {e}")))?,
            None => {
                let port = parse_value(lookup("PORT"), DEFAULT_PORT);
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let connection_buffer =
            parse_value(lookup("CONNECTION_BUFFER"), DEFAULT_CONNECTION_BUFFER).max(1);
        let request_timeout = Duration::from_secs(parse_value(
            lookup("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        ));

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            connection_buffer,
            request_timeout,
            log_format,
        })
    }
}

/// Parses `raw` as `T`, returning `default` on missing or invalid values.
fn parse_value<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<RelayConfig, RelayError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RelayConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        let Ok(config) = load(&[]) else {
            panic!("defaults must load");
        };
        assert_eq!(config.listen_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.connection_buffer, 256);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn port_used_without_listen_addr() {
        let Ok(config) = load(&[("PORT", "9000")]) else {
            panic!("config must load");
        };
        assert_eq!(config.listen_addr.port(), 9000);
    }

    #[test]
    fn listen_addr_wins_over_port() {
        let Ok(config) = load(&[("LISTEN_ADDR", "127.0.0.1:4000"), ("PORT", "9000")]) else {
            panic!("config must load");
        };
        assert_eq!(config.listen_addr, SocketAddr::from(([127, 0, 0, 1], 4000)));
    }

    #[test]
    fn invalid_listen_addr_is_an_error() {
        assert!(matches!(
            load(&[("LISTEN_ADDR", "nowhere")]),
            Err(RelayError::Config(_))
        ));
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let Ok(config) = load(&[("CONNECTION_BUFFER", "lots"), ("REQUEST_TIMEOUT_SECS", "-1")])
        else {
            panic!("config must load");
        };
        assert_eq!(config.connection_buffer, 256);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_buffer_is_raised_to_one() {
        let Ok(config) = load(&[("CONNECTION_BUFFER", "0")]) else {
            panic!("config must load");
        };
        assert_eq!(config.connection_buffer, 1);
    }

    #[test]
    fn json_log_format() {
        let Ok(config) = load(&[("LOG_FORMAT", "json")]) else {
            panic!("config must load");
        };
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
