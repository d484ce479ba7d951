//! Configuration Module
//!
//! Handles loading the CLI configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI root.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// CLI configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache expiry interval; zero disables expiry
    pub cache_interval: Duration,
    /// PokeAPI root URL, without a trailing slash
    pub base_url: String,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_INTERVAL_SECS` - Cache expiry in seconds, `<= 0` disables expiry (default: 60)
    /// - `POKEAPI_BASE_URL` - API root URL (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_HTTP_TIMEOUT_SECS` - HTTP request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_interval: env::var("POKEDEX_CACHE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.trim().parse::<i64>().ok())
                .map(interval_from_secs)
                .unwrap_or(defaults.cache_interval),
            base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            http_timeout: env::var("POKEDEX_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
        }
    }
}

/// Maps a signed second count to a cache interval; non-positive means no expiry.
fn interval_from_secs(secs: i64) -> Duration {
    u64::try_from(secs)
        .map(Duration::from_secs)
        .unwrap_or(Duration::ZERO)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_interval: Duration::from_secs(60),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_interval, Duration::from_secs(60));
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_interval_from_secs() {
        assert_eq!(interval_from_secs(5), Duration::from_secs(5));
        assert_eq!(interval_from_secs(0), Duration::ZERO);
        assert_eq!(interval_from_secs(-30), Duration::ZERO);
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment to avoid races between tests
        env::remove_var("POKEDEX_CACHE_INTERVAL_SECS");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("POKEDEX_HTTP_TIMEOUT_SECS");

        let config = Config::from_env();
        assert_eq!(config.cache_interval, Duration::from_secs(60));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(10));

        env::set_var("POKEDEX_CACHE_INTERVAL_SECS", "-1");
        env::set_var("POKEAPI_BASE_URL", "http://127.0.0.1:8080/api/v2/");
        env::set_var("POKEDEX_HTTP_TIMEOUT_SECS", "nope");

        let config = Config::from_env();
        assert_eq!(config.cache_interval, Duration::ZERO);
        assert_eq!(config.base_url, "http://127.0.0.1:8080/api/v2");
        assert_eq!(config.http_timeout, Duration::from_secs(10));

        env::remove_var("POKEDEX_CACHE_INTERVAL_SECS");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("POKEDEX_HTTP_TIMEOUT_SECS");
    }
}
