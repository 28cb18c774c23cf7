//! Table-backed geocoder.

use std::collections::HashMap;
use std::convert::Infallible;

use crate::domain::Coordinate;
use crate::pipeline::Geocoder;

use super::GeocodedPlace;

/// Geocoder answering from a fixed name → place table.
///
/// Lookups ignore case and surrounding whitespace.
///
/// # Example
///
/// ```
/// use commute_server::domain::Coordinate;
/// use commute_server::geocode::StaticGeocoder;
///
/// let geocoder = StaticGeocoder::new()
///     .with_place("MG Road", Coordinate::new(12.9716, 77.5946).unwrap());
/// assert!(geocoder.lookup("  mg road ").is_some());
/// assert!(geocoder.lookup("Atlantis").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, GeocodedPlace>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place; its display name is the name as given.
    pub fn with_place(mut self, name: &str, coordinate: Coordinate) -> Self {
        self.places.insert(
            normalize(name),
            GeocodedPlace {
                coordinate,
                display_name: name.trim().to_string(),
            },
        );
        self
    }

    /// Find a place by name.
    pub fn lookup(&self, name: &str) -> Option<&GeocodedPlace> {
        self.places.get(&normalize(name))
    }

}

/// Key used for table and cache lookups.
pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Geocoder for StaticGeocoder {
    type Error = Infallible;

    async fn geocode(&self, name: &str) -> Result<Option<GeocodedPlace>, Infallible> {
        Ok(self.lookup(name).cloned())
    }
}
