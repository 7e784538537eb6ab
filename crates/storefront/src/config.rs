//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `STOREFRONT_CATALOG_PATH` - Catalog snapshot (JSON) served by the listing pages
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_PRICE_MIN` / `STOREFRONT_PRICE_MAX` - Price slider domain (default: 0 / 500)
//! - `STOREFRONT_PRICE_POLICY` - `clamp`, `reject` or `passthrough` (default: clamp)
//! - `STOREFRONT_COMPARE_MAX` - Compare list capacity (default: 4)
//! - `STOREFRONT_RECENT_SEARCHES_MAX` - Remembered searches (default: 5)
//! - `STOREFRONT_EXIT_POPUP_SUPPRESS_DAYS` - Days a dismissed exit popup stays hidden (default: 7)
//! - `STOREFRONT_CACHE_TTL_SECONDS` - Listing cache TTL (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use flightdeck_core::compare::DEFAULT_MAX_COMPARE_ITEMS;
use flightdeck_core::listing::{ListingConfig, ListingContext, PriceBounds, PricePolicy};
use flightdeck_core::popup::{DEFAULT_SUPPRESS_DAYS, ExitPopupPolicy};
use flightdeck_core::recent::DEFAULT_RECENT_SEARCH_LIMIT;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
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
    /// Catalog snapshot location
    pub catalog_path: PathBuf,
    /// Listing page settings
    pub listing: ListingSettings,
    /// Compare list capacity
    pub compare_max: usize,
    /// Number of remembered searches
    pub recent_searches_max: usize,
    /// Days a dismissed exit popup stays hidden
    pub exit_popup_suppress_days: u32,
    /// Time-to-live for cached listing results
    pub cache_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Price domain and URL validation policy shared by every listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingSettings {
    /// Price slider domain
    pub bounds: PriceBounds,
    /// Handling of out-of-domain prices in the URL
    pub price_policy: PricePolicy,
}

impl ListingSettings {
    /// Listing configuration for a page kind.
    #[must_use]
    pub const fn config(&self, context: ListingContext) -> ListingConfig {
        ListingConfig::new(context)
            .with_bounds(self.bounds)
            .with_price_policy(self.price_policy)
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;
        let catalog_path = PathBuf::from(get_required_env("STOREFRONT_CATALOG_PATH")?);

        let listing = ListingSettings::from_env()?;
        let compare_max = parse_env_or_default::<usize>(
            "STOREFRONT_COMPARE_MAX",
            &DEFAULT_MAX_COMPARE_ITEMS.to_string(),
        )?;
        if compare_max == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_COMPARE_MAX".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let recent_searches_max = parse_env_or_default::<usize>(
            "STOREFRONT_RECENT_SEARCHES_MAX",
            &DEFAULT_RECENT_SEARCH_LIMIT.to_string(),
        )?;
        let exit_popup_suppress_days = parse_env_or_default::<u32>(
            "STOREFRONT_EXIT_POPUP_SUPPRESS_DAYS",
            &DEFAULT_SUPPRESS_DAYS.to_string(),
        )?;
        let cache_ttl = Duration::from_secs(parse_env_or_default::<u64>(
            "STOREFRONT_CACHE_TTL_SECONDS",
            "300",
        )?);

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path,
            listing,
            compare_max,
            recent_searches_max,
            exit_popup_suppress_days,
            cache_ttl,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
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

    /// Exit popup suppression policy.
    #[must_use]
    pub fn exit_popup_policy(&self) -> ExitPopupPolicy {
        ExitPopupPolicy::new(self.exit_popup_suppress_days)
    }
}

impl ListingSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let min = parse_env_or_default::<i64>(
            "STOREFRONT_PRICE_MIN",
            &PriceBounds::DEFAULT.min().to_string(),
        )?;
        let max = parse_env_or_default::<i64>(
            "STOREFRONT_PRICE_MAX",
            &PriceBounds::DEFAULT.max().to_string(),
        )?;
        let bounds = PriceBounds::new(min, max).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_PRICE_MIN".to_string(), e.to_string())
        })?;
        let price_policy =
            parse_env_or_default::<PricePolicy>("STOREFRONT_PRICE_POLICY", "clamp")?;

        Ok(Self {
            bounds,
            price_policy,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
