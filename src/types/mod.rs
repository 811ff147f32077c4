//! Core types for geocoding lookups.
//!
//! Covers both the caller-facing shapes (`Coordinate`, `GeocodeRecord`) and
//! the wire-format response returned by the remote geocoding API.

use serde::{Deserialize, Serialize};

/// A resolved latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

/// One entry of a batch lookup result.
///
/// `lat`/`lng` are `None` when the lookup for `addr` failed; the batch
/// operation never drops or reorders entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeRecord {
    /// The address exactly as it was submitted.
    pub addr: String,
    /// Resolved latitude, or `None` on failure.
    pub lat: Option<f64>,
    /// Resolved longitude, or `None` on failure.
    pub lng: Option<f64>,
}

impl GeocodeRecord {
    /// Creates a record for a successfully resolved address.
    pub fn resolved(addr: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            addr: addr.into(),
            lat: Some(coordinate.lat),
            lng: Some(coordinate.lng),
        }
    }

    /// Creates a null-valued record for a failed lookup.
    pub fn failed(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            lat: None,
            lng: None,
        }
    }

    /// Returns true if the lookup produced coordinates.
    pub fn is_resolved(&self) -> bool {
        self.lat.is_some() && self.lng.is_some()
    }
}

/// Wire-format response returned by the geocoding API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResponse {
    /// Remote status string; `"OK"` on success.
    pub status: String,
    /// Candidate matches, best first. Empty on error statuses.
    #[serde(default)]
    pub results: Vec<GeocodeCandidate>,
    /// Optional human-readable detail accompanying an error status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    /// Remote status value signalling a successful lookup.
    pub const STATUS_OK: &'static str = "OK";

    /// Returns true if the remote service reported success.
    pub fn is_ok(&self) -> bool {
        self.status == Self::STATUS_OK
    }
}

/// One candidate match returned by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    /// The canonical address of the match, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    /// Geometry of the match.
    pub geometry: Geometry,
}

/// Geometry block of a candidate match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    /// The resolved location.
    pub location: Coordinate,
}
