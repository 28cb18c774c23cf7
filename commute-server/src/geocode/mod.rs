//! Place name geocoding.
//!
//! Resolves free-text place names to coordinates. The live client talks to
//! a Nominatim-compatible search endpoint; [`StaticGeocoder`] answers from
//! a fixed table for offline use.

mod client;
mod error;
mod fixed;

pub use client::{DEFAULT_SEARCH_URL, NominatimClient, NominatimConfig};
pub use error::GeocodeError;
pub use fixed::StaticGeocoder;
pub(crate) use fixed::normalize;

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;

/// A resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub coordinate: Coordinate,
    /// Human-readable name as reported by the geocoder.
    pub display_name: String,
}
