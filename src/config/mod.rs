//! Configuration module for the geocoding client.
//!
//! Provides configuration management including the API key, base URL,
//! request timeout, cache capacity, and progress display.

use std::num::NonZeroUsize;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::errors::{GeocodeError, GeocodeResult};

/// Default base URL for the geocoding API.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode";

/// Default request timeout (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the geocoding client.
#[derive(Clone)]
pub struct GeocodeConfig {
    /// API key for authentication (stored securely).
    pub(crate) api_key: SecretString,
    /// Base URL for API requests.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Capacity of the address cache.
    pub cache_capacity: NonZeroUsize,
    /// Whether batch lookups display a progress bar.
    pub show_progress: bool,
    /// Optional language hint forwarded with every request.
    pub language: Option<String>,
    /// Optional region bias forwarded with every request.
    pub region: Option<String>,
}

impl GeocodeConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> GeocodeConfigBuilder {
        GeocodeConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GEOCODE_API_KEY` (required): API key for authentication
    /// - `GEOCODE_BASE_URL` (optional): Custom base URL
    /// - `GEOCODE_TIMEOUT` (optional): Request timeout in seconds
    pub fn from_env() -> GeocodeResult<Self> {
        let api_key = std::env::var("GEOCODE_API_KEY").map_err(|_| {
            GeocodeError::configuration("GEOCODE_API_KEY environment variable not set")
        })?;

        let mut builder = GeocodeConfigBuilder::new().api_key(api_key);

        if let Ok(base_url) = std::env::var("GEOCODE_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(timeout_str) = std::env::var("GEOCODE_TIMEOUT") {
            if let Ok(timeout_secs) = timeout_str.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(timeout_secs));
            }
        }

        builder.build()
    }

    /// Returns the API key (exposing the secret).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Returns the API key hint (last 4 characters) for debugging.
    pub fn api_key_hint(&self) -> String {
        let key = self.api_key.expose_secret();
        if key.len() > 4 {
            format!("...{}", &key[key.len() - 4..])
        } else {
            "****".to_string()
        }
    }
}

impl std::fmt::Debug for GeocodeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodeConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("cache_capacity", &self.cache_capacity)
            .field("show_progress", &self.show_progress)
            .finish()
    }
}

/// Builder for `GeocodeConfig`.
#[derive(Default)]
pub struct GeocodeConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    cache_capacity: Option<usize>,
    show_progress: Option<bool>,
    language: Option<String>,
    region: Option<String>,
}

impl GeocodeConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Sets the capacity of the address cache.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Enables or disables the batch progress bar (enabled by default).
    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = Some(show_progress);
        self
    }

    /// Sets the language hint forwarded with every request.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the region bias forwarded with every request.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> GeocodeResult<GeocodeConfig> {
        let api_key = self
            .api_key
            .ok_or_else(|| GeocodeError::configuration("API key is required"))?;

        if api_key.is_empty() {
            return Err(GeocodeError::configuration("API key cannot be empty"));
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        if !base_url.starts_with("https://") {
            return Err(GeocodeError::configuration("Base URL must use HTTPS"));
        }

        let cache_capacity = self.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY);
        let cache_capacity = NonZeroUsize::new(cache_capacity).ok_or_else(|| {
            GeocodeError::configuration("Cache capacity must be greater than zero")
        })?;

        Ok(GeocodeConfig {
            api_key: SecretString::new(api_key),
            base_url,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            cache_capacity,
            show_progress: self.show_progress.unwrap_or(true),
            language: self.language,
            region: self.region,
        })
    }
}
