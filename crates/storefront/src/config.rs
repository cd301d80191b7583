//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>).
//!   Session cookies are marked `Secure` when this is an `https://` URL.
//! - `PRODUCTS_SOURCE_URL` - JSON endpoint returning the product catalog
//! - `PRODUCTS_TIMEOUT_SECS` - Catalog fetch timeout in seconds (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Catalog endpoint used when `PRODUCTS_SOURCE_URL` is not set.
pub const DEFAULT_PRODUCTS_URL: &str = "https://68d99d6890a75154f0dac9e3.mockapi.io/tienda/productos/";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Remote product catalog
    pub products: ProductSourceConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Remote product catalog configuration.
#[derive(Debug, Clone)]
pub struct ProductSourceConfig {
    /// Endpoint returning a JSON array of products
    pub url: Url,
    /// Request timeout
    pub timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_var(&lookup, "STOREFRONT_HOST", "127.0.0.1", |v| {
            v.parse::<IpAddr>().map_err(|e| e.to_string())
        })?;
        let port = parse_var(&lookup, "STOREFRONT_PORT", "3000", |v| {
            v.parse::<u16>().map_err(|e| e.to_string())
        })?;
        let base_url = lookup("STOREFRONT_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        let products = ProductSourceConfig::from_vars(&lookup)?;

        Ok(Self {
            host,
            port,
            base_url,
            products,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ProductSourceConfig {
    fn from_vars(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = parse_var(lookup, "PRODUCTS_SOURCE_URL", DEFAULT_PRODUCTS_URL, |v| {
            let url = Url::parse(v).map_err(|e| e.to_string())?;
            match url.scheme() {
                "http" | "https" => Ok(url),
                other => Err(format!("unsupported scheme '{other}'")),
            }
        })?;
        let timeout = parse_var(lookup, "PRODUCTS_TIMEOUT_SECS", "10", |v| {
            v.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| e.to_string())
        })?;

        Ok(Self { url, timeout })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when it is unset.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    parse(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.products.url.as_str(), DEFAULT_PRODUCTS_URL);
        assert_eq!(config.products.timeout, Duration::from_secs(10));
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_BASE_URL", "https://tienda.example"),
            ("PRODUCTS_SOURCE_URL", "http://localhost:4000/productos"),
            ("PRODUCTS_TIMEOUT_SECS", "3"),
            ("SENTRY_DSN", ""),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().port(), 8080);
        assert!(config.is_secure());
        assert_eq!(
            config.products.url.as_str(),
            "http://localhost:4000/productos"
        );
        assert_eq!(config.products.timeout, Duration::from_secs(3));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("STOREFRONT_PORT", "70000")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_products_url_must_be_http() {
        let err = config_from(&[("PRODUCTS_SOURCE_URL", "ftp://files.example/p.json")]).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));

        assert!(config_from(&[("PRODUCTS_SOURCE_URL", "not a url")]).is_err());
    }
}
