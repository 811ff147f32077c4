//! Geocoding API Client Library
//!
//! A convenience Rust client for the Google Geocoding API. Resolves single
//! addresses or address lists to latitude/longitude pairs, caches prior
//! successful lookups in a bounded LRU cache, classifies remote error
//! statuses into a closed taxonomy, and tallies failures per batch.
//!
//! # Features
//!
//! - **Bounded caching**: 2500-entry LRU cache of successful lookups;
//!   failures are never cached and retry on the next request
//! - **Batch lookups**: strict input-order output, partial-failure tolerant,
//!   with a per-call error tally logged after each batch
//! - **Error taxonomy**: the five documented remote statuses plus verbatim
//!   passthrough of anything unrecognized
//! - **Progress display**: optional indicatif progress bar during batches,
//!   decided once at construction
//! - **Observability**: structured logging via `tracing`
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use geocode_client::GeocodeClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeocodeClient::builder()
//!         .api_key("your_api_key")
//!         .build()?;
//!
//!     // Single lookup; the result is cached.
//!     let coordinate = client.geocode("Seoul").await?;
//!     println!("{}, {}", coordinate.lat, coordinate.lng);
//!
//!     // Batch lookup; failed addresses yield null records.
//!     let records = client.geocode_list(&["Seoul", "Busan", "???"]).await;
//!     for record in &records {
//!         println!("{}: {:?}, {:?}", record.addr, record.lat, record.lng);
//!     }
//!
//!     println!("{:?}", client.cache_info().await);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod progress;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use cache::{CacheInfo, DEFAULT_CACHE_CAPACITY};
pub use client::{ErrorTally, GeocodeClient, GeocodeClientBuilder};
pub use config::GeocodeConfig;
pub use errors::{ApiStatus, GeocodeError, GeocodeResult};
pub use progress::{BarProgress, NoProgress, ProgressReporter};
pub use types::{Coordinate, GeocodeRecord};

/// Mock implementations for testing.
pub mod mocks;
