//! Upstream collaborators of the candidate pipeline.
//!
//! These traits allow the pipeline to be tested with mock providers and
//! let the HTTP clients stay ignorant of retry and fallback policy.

use std::fmt::Display;
use std::future::Future;

use crate::domain::{Coordinate, RouteResult, TravelMode};
use crate::geocode::GeocodedPlace;
use crate::predictor::DelayFeatures;

/// Computes a route between two points for a travel mode.
pub trait DirectionsProvider {
    type Error: Display;

    fn route(
        &self,
        origin: Coordinate,
        dest: Coordinate,
        mode: &TravelMode,
    ) -> impl Future<Output = Result<RouteResult, Self::Error>> + Send;
}

/// Predicts a delay-adjusted duration in minutes.
///
/// `Ok(None)` means the predictor answered without a usable value.
pub trait DelayPredictor {
    type Error: Display;

    fn predict(
        &self,
        features: &DelayFeatures,
    ) -> impl Future<Output = Result<Option<f64>, Self::Error>> + Send;
}

/// Resolves a place name to a coordinate.
pub trait Geocoder {
    type Error: Display;

    fn geocode(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<GeocodedPlace>, Self::Error>> + Send;
}
