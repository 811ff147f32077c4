//! Geocoding client.
//!
//! Provides the main client interface: single-address lookup backed by a
//! bounded LRU cache, batch lookup with per-call error tallies, and cache
//! management operations.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::instrument;

use crate::cache::{CacheInfo, GeocodeCache};
use crate::config::{GeocodeConfig, GeocodeConfigBuilder};
use crate::errors::{GeocodeError, GeocodeResult};
use crate::progress::{BarProgress, NoProgress, ProgressReporter};
use crate::transport::{HttpRequest, HttpTransport, HttpTransportImpl};
use crate::types::{Coordinate, GeocodeRecord, GeocodeResponse};

/// The main geocoding client.
///
/// Resolves addresses to coordinates through the remote geocoding API,
/// caching successful lookups in a bounded LRU cache. Failed lookups are
/// never cached; a repeated request for a failing address re-issues the
/// remote call.
///
/// # Example
///
/// ```rust,no_run
/// use geocode_client::GeocodeClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = GeocodeClient::builder()
///         .api_key("your_api_key")
///         .build()?;
///
///     let coordinate = client.geocode("Seoul").await?;
///     println!("{}, {}", coordinate.lat, coordinate.lng);
///     Ok(())
/// }
/// ```
pub struct GeocodeClient {
    config: GeocodeConfig,
    transport: Arc<dyn HttpTransport>,
    progress: Arc<dyn ProgressReporter>,
    cache: Mutex<GeocodeCache>,
}

impl GeocodeClient {
    /// Creates a new client builder.
    pub fn builder() -> GeocodeClientBuilder {
        GeocodeClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `GEOCODE_API_KEY` and optionally `GEOCODE_BASE_URL` and
    /// `GEOCODE_TIMEOUT`.
    pub fn from_env() -> GeocodeResult<Self> {
        let config = GeocodeConfig::from_env()?;
        GeocodeClientBuilder::from_config(config).build()
    }

    /// Creates a client from an API key.
    pub fn from_api_key(api_key: impl Into<String>) -> GeocodeResult<Self> {
        GeocodeClientBuilder::new().api_key(api_key).build()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GeocodeConfig {
        &self.config
    }

    /// Resolves a single address to a coordinate.
    ///
    /// The cache is consulted first; a hit returns the stored coordinate
    /// without a remote call. On a miss, exactly one remote lookup is
    /// performed and a successful result is inserted into the cache,
    /// evicting the least-recently-used entry at capacity.
    #[instrument(skip(self), fields(address = %address))]
    pub async fn geocode(&self, address: &str) -> GeocodeResult<Coordinate> {
        if address.is_empty() {
            return Err(GeocodeError::validation("address must not be empty"));
        }

        // The lock spans check, remote call, and insert so a shared client
        // cannot race duplicate lookups for one address. Lookups stay
        // strictly sequential, one in flight at a time.
        let mut cache = self.cache.lock().await;
        if let Some(coordinate) = cache.get(address) {
            tracing::debug!("cache hit");
            return Ok(coordinate);
        }

        let coordinate = self.lookup(address).await?;
        cache.insert(address.to_string(), coordinate);
        Ok(coordinate)
    }

    /// Resolves a list of addresses, preserving input order.
    ///
    /// Each failed address yields a null-valued [`GeocodeRecord`] instead of
    /// aborting the batch. Failure categories are tallied per call and a
    /// non-empty tally is logged as a summary after the batch completes.
    #[instrument(skip_all, fields(count = addresses.len()))]
    pub async fn geocode_list<S: AsRef<str>>(&self, addresses: &[S]) -> Vec<GeocodeRecord> {
        if addresses.is_empty() {
            return Vec::new();
        }

        let mut records = Vec::with_capacity(addresses.len());
        let mut tally = ErrorTally::default();

        self.progress.start(addresses.len() as u64);
        for address in addresses {
            let address = address.as_ref();
            match self.geocode(address).await {
                Ok(coordinate) => records.push(GeocodeRecord::resolved(address, coordinate)),
                Err(error) => {
                    tracing::debug!(%error, address, "lookup failed");
                    tally.record(&error);
                    records.push(GeocodeRecord::failed(address));
                }
            }
            self.progress.tick();
        }
        self.progress.finish();

        if !tally.is_empty() {
            tracing::warn!("{tally}");
        }

        records
    }

    /// Empties the cache and resets its hit/miss counters.
    pub async fn cache_clear(&self) {
        self.cache.lock().await.clear();
        tracing::info!("geocode cache cleared");
    }

    /// Returns a snapshot of cache statistics.
    ///
    /// Hit and miss counts accumulate since client construction or the last
    /// [`cache_clear`](Self::cache_clear), whichever is later.
    pub async fn cache_info(&self) -> CacheInfo {
        self.cache.lock().await.info()
    }

    /// Performs the remote lookup for one address.
    async fn lookup(&self, address: &str) -> GeocodeResult<Coordinate> {
        let mut request = HttpRequest::get("json")
            .with_query("address", address)
            .with_query("key", self.config.api_key());

        if let Some(language) = &self.config.language {
            request = request.with_query("language", language);
        }
        if let Some(region) = &self.config.region {
            request = request.with_query("region", region);
        }

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(GeocodeError::Network {
                message: format!("HTTP {}", response.status),
            });
        }

        let payload: GeocodeResponse = response.json()?;
        if !payload.is_ok() {
            return Err(GeocodeError::api(&payload.status));
        }

        let candidate = payload.results.first().ok_or_else(|| {
            GeocodeError::Serialization {
                message: "remote status OK but no results returned".to_string(),
            }
        })?;
        Ok(candidate.geometry.location)
    }
}

impl std::fmt::Debug for GeocodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodeClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Failure counts for one batch call, keyed by error category.
///
/// Rebuilt fresh on every [`GeocodeClient::geocode_list`] invocation; never
/// cumulative across calls.
#[derive(Debug, Default)]
pub struct ErrorTally {
    counts: HashMap<String, u64>,
}

impl ErrorTally {
    /// Records one failure under its category label.
    pub fn record(&mut self, error: &GeocodeError) {
        *self.counts.entry(error.category().to_string()).or_insert(0) += 1;
    }

    /// Returns true if no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the count recorded for a category.
    pub fn count(&self, category: &str) -> u64 {
        self.counts.get(category).copied().unwrap_or(0)
    }

    /// Categories with counts, highest first; ties break by category name.
    pub fn sorted_counts(&self) -> Vec<(String, u64)> {
        let mut counts: Vec<_> = self
            .counts
            .iter()
            .map(|(category, count)| (category.clone(), *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}

impl std::fmt::Display for ErrorTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .sorted_counts()
            .iter()
            .map(|(category, count)| format!("{category}={count}"))
            .collect();
        write!(f, "error counts: {}", parts.join(", "))
    }
}

/// Builder for the geocoding client.
pub struct GeocodeClientBuilder {
    config_builder: GeocodeConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    progress: Option<Arc<dyn ProgressReporter>>,
}

impl GeocodeClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: GeocodeConfigBuilder::new(),
            transport: None,
            progress: None,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: GeocodeConfig) -> Self {
        let mut config_builder = GeocodeConfigBuilder::new()
            .api_key(config.api_key())
            .base_url(&config.base_url)
            .timeout(config.timeout)
            .cache_capacity(config.cache_capacity.get())
            .show_progress(config.show_progress);
        if let Some(language) = &config.language {
            config_builder = config_builder.language(language);
        }
        if let Some(region) = &config.region {
            config_builder = config_builder.region(region);
        }

        Self {
            config_builder,
            transport: None,
            progress: None,
        }
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(api_key);
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Sets the capacity of the address cache.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config_builder = self.config_builder.cache_capacity(capacity);
        self
    }

    /// Enables or disables the batch progress bar (enabled by default).
    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.config_builder = self.config_builder.show_progress(show_progress);
        self
    }

    /// Sets the language hint forwarded with every request.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.language(language);
        self
    }

    /// Sets the region bias forwarded with every request.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.region(region);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom progress reporter.
    ///
    /// A custom reporter is used as given; the `show_progress` flag only
    /// selects between the built-in defaults.
    pub fn progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Builds the client.
    pub fn build(self) -> GeocodeResult<GeocodeClient> {
        let config = self.config_builder.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                HttpTransportImpl::new(&config.base_url, config.timeout)
                    .map_err(|e| GeocodeError::configuration(e.to_string()))?,
            ),
        };

        let progress: Arc<dyn ProgressReporter> = match self.progress {
            Some(p) => p,
            None if config.show_progress => Arc::new(BarProgress::new()),
            None => Arc::new(NoProgress),
        };

        let cache = Mutex::new(GeocodeCache::new(config.cache_capacity));

        Ok(GeocodeClient {
            config,
            transport,
            progress,
            cache,
        })
    }
}

impl Default for GeocodeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
